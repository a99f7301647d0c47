use std::path::PathBuf;

use rdev::EventType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("synthetic keyboard input is unavailable: {0}")]
    InjectorUnavailable(String),

    #[error("failed to simulate {0:?}")]
    Simulate(EventType),

    #[error("global hotkey listener stopped: {0}")]
    Listen(String),

    #[error("could not access config at {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config at {path} is not valid JSON: {source}")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
