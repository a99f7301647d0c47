use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rdev::Key;

use crate::config::{save_config, AppConfig, HOTKEY_CHOICES};
use crate::driver::{CodeEntryDriver, DriverState, Phase};
use crate::hotkey::{spawn_listener, Command};
use crate::injector::RdevInjector;

const AUTHOR: &str = "DRAGEno01";

pub struct GuesserApp {
    driver: CodeEntryDriver<RdevInjector, StdRng>,
    config: AppConfig,
    hotkey: Arc<Mutex<Key>>,
    commands: Receiver<Command>,
    history_open: bool,
}

impl GuesserApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, injector: RdevInjector) -> Self {
        let hotkey = Arc::new(Mutex::new(config.hotkey_key()));
        let (sender, commands) = mpsc::channel();
        spawn_listener(Arc::clone(&hotkey), sender, cc.egui_ctx.clone());

        Self {
            driver: CodeEntryDriver::new(injector, StdRng::from_entropy(), config.timings()),
            config,
            hotkey,
            commands,
            history_open: false,
        }
    }

    fn toggle(&mut self, now: Instant) {
        if self.driver.is_running() {
            self.driver.stop();
        } else {
            self.driver.start(now);
        }
    }

    fn settings_changed(&mut self) {
        self.driver.set_timings(self.config.timings());
        let key = self.config.hotkey_key();
        match self.hotkey.lock() {
            Ok(mut hotkey) => *hotkey = key,
            Err(poisoned) => *poisoned.into_inner() = key,
        }
        save_config(&self.config);
    }

    fn status_label(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Status:");
            match self.driver.state() {
                DriverState::Idle => ui.colored_label(egui::Color32::RED, "STOPPED"),
                DriverState::PendingStart => {
                    ui.colored_label(egui::Color32::YELLOW, "FOCUS THE CODE FIELD")
                }
                DriverState::Cycling(Phase::Type) => ui.colored_label(egui::Color32::GREEN, "TYPING"),
                DriverState::Cycling(Phase::Clear) => {
                    ui.colored_label(egui::Color32::GREEN, "CLEARING")
                }
            };
        });
    }

    fn settings(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        egui::CollapsingHeader::new("Settings").show(ui, |ui| {
            egui::Grid::new("timings").num_columns(2).show(ui, |ui| {
                for (label, value, range) in [
                    ("Start delay", &mut self.config.start_delay_ms, 100..=5000),
                    ("Type delay", &mut self.config.type_delay_ms, 100..=5000),
                    ("Clear delay", &mut self.config.clear_delay_ms, 50..=5000),
                    ("Keystroke spacing", &mut self.config.keystroke_spacing_ms, 1..=200),
                ] {
                    ui.label(label);
                    changed |= ui
                        .add(egui::Slider::new(value, range).suffix(" ms"))
                        .changed();
                    ui.end_row();
                }
            });

            let mut hotkey = self.config.hotkey.clone();
            egui::ComboBox::from_label("Start/stop hotkey")
                .selected_text(hotkey.as_str())
                .show_ui(ui, |ui| {
                    for (name, _) in HOTKEY_CHOICES {
                        ui.selectable_value(&mut hotkey, name.to_string(), name);
                    }
                });
            if hotkey != self.config.hotkey {
                self.config.hotkey = hotkey;
                changed = true;
            }
        });

        if changed {
            self.settings_changed();
        }
    }

    fn history_window(&mut self, ctx: &egui::Context) {
        let history = self.driver.history();
        egui::Window::new(format!("Attempted Codes ({})", history.len()))
            .id(egui::Id::new("attempt_history"))
            .open(&mut self.history_open)
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                if history.is_empty() {
                    ui.label("No codes tried yet.");
                    return;
                }
                egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                    for (ordinal, code) in history.entries_newest_first() {
                        ui.label(
                            egui::RichText::new(format!("Code #{ordinal}: {code}"))
                                .monospace()
                                .size(16.0),
                        );
                    }
                });
            });
    }
}

impl eframe::App for GuesserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        while let Ok(command) = self.commands.try_recv() {
            match command {
                Command::Toggle => self.toggle(now),
            }
        }
        self.driver.tick(now);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let counter = ui
                    .add(
                        egui::Label::new(
                            egui::RichText::new(self.driver.attempts().to_string())
                                .size(32.0)
                                .strong(),
                        )
                        .sense(egui::Sense::click()),
                    )
                    .on_hover_text("Click to view attempted codes");
                if counter.clicked() {
                    self.history_open = true;
                }
                ui.heading("Code Guesser");
            });

            if let Some(code) = self.driver.history().latest() {
                ui.label(format!("Last code: {code}"));
            }

            ui.separator();
            self.status_label(ui);

            ui.horizontal(|ui| {
                let running = self.driver.is_running();
                if ui
                    .add_enabled(!running, egui::Button::new("Start Guessing"))
                    .clicked()
                {
                    self.driver.start(Instant::now());
                }
                if ui
                    .add_enabled(running, egui::Button::new("Stop Guessing"))
                    .clicked()
                {
                    self.driver.stop();
                }
            });
            ui.label(format!(
                "Press {} anywhere to start or stop.",
                self.config.hotkey
            ));

            ui.separator();
            self.settings(ui);

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("Created by {AUTHOR}"))
                        .italics()
                        .small()
                        .color(egui::Color32::GRAY),
                );
            });
        });

        self.history_window(ctx);

        if let Some(due) = self.driver.next_deadline() {
            ctx.request_repaint_after(due.saturating_duration_since(Instant::now()));
        }
    }
}
