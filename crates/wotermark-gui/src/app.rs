use std::sync::mpsc;

use wotermark_core::api::ImageOutcome;
use wotermark_core::session::WatermarkSession;
use wotermark_core::store::WatermarkStore;

use crate::convert::decode_preview;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::prefs::Preferences;
use crate::state::UIState;
use crate::worker;

pub struct WotermarkApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub session: WatermarkSession,
    pub ui_state: UIState,
    pub prefs: Preferences,
    pub preview_texture: Option<egui::TextureHandle>,
    pub show_about: bool,
}

impl WotermarkApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx, ctx.clone());

        let mut session = WatermarkSession::new(WatermarkStore::new(WatermarkStore::default_dir()));
        session.initialize();

        let prefs = Preferences::load();
        prefs.theme.apply(ctx);
        let ui_state = UIState::new(session.config(), &prefs.endpoint);

        Self {
            cmd_tx,
            result_rx,
            session,
            ui_state,
            prefs,
            preview_texture: None,
            show_about: false,
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// Apply a hydration result once the session's load completes.
    fn poll_session(&mut self, ctx: &egui::Context) {
        if self.session.poll() {
            self.ui_state.sync_config_inputs(self.session.config());
            self.refresh_preview(ctx);
            self.ui_state
                .add_log("Restored watermark from previous session".into());
        }
    }

    /// Rebuild the preview texture from the session's current bytes.
    pub fn refresh_preview(&mut self, ctx: &egui::Context) {
        let bytes = self
            .session
            .preview()
            .and_then(|handle| self.session.resolve(&handle));

        self.preview_texture = match bytes {
            Some(bytes) => match decode_preview(&bytes) {
                Ok(image) => {
                    Some(ctx.load_texture("watermark-preview", image, Default::default()))
                }
                Err(e) => {
                    self.ui_state
                        .add_log(format!("Failed to decode watermark preview: {e}"));
                    None
                }
            },
            None => None,
        };
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::WatermarkLoaded { bytes } => {
                    self.session.set_watermark(Some(bytes));
                    self.refresh_preview(ctx);
                    self.ui_state.add_log("Watermark updated".into());
                }
                WorkerResult::ImagesLoaded { images } => {
                    let count = images.len();
                    self.ui_state.images.extend(images);
                    self.ui_state.add_log(format!(
                        "Added {count} {}",
                        if count == 1 { "image" } else { "images" }
                    ));
                }
                WorkerResult::SubmitComplete { batch } => {
                    self.ui_state.processing = false;
                    for outcome in &batch.outcomes {
                        if let ImageOutcome::Failed { file_name, reason } = outcome {
                            self.ui_state.add_log(format!("{file_name}: {reason}"));
                        }
                    }
                    self.ui_state.add_log(format!(
                        "Processing complete: {} succeeded, {} failed",
                        batch.processed_count(),
                        batch.failed_count()
                    ));
                    self.ui_state.last_batch = Some(batch);
                }
                WorkerResult::OutputsSaved { dir, count } => {
                    self.ui_state
                        .add_log(format!("Saved {count} files to {}", dir.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.processing = false;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }
}

impl eframe::App for WotermarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_session(ctx);
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                panels::watermark::show(ui, self);
                ui.add_space(12.0);
                panels::images::show(ui, self);
                ui.add_space(12.0);
                panels::submit::show(ui, self);
            });
        });

        if self.show_about {
            let mut open = self.show_about;
            egui::Window::new("About Wotermark")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Wotermark");
                    ui.label("Batch watermarking client.");
                    ui.label(
                        "Upload a watermark image, queue target images, and submit \
                         them for server-side compositing.",
                    );
                });
            self.show_about = open;
        }
    }

    fn on_exit(&mut self) {
        // Let the final persistence write land before the process exits.
        self.session.settle();
        self.prefs.save();
    }
}
