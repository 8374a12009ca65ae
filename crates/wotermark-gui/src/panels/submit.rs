use wotermark_core::api::ImageOutcome;

use crate::app::WotermarkApp;
use crate::messages::WorkerCommand;

pub fn show(ui: &mut egui::Ui, app: &mut WotermarkApp) {
    super::section_header(ui, "Process", None);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label("Server");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.endpoint_input).desired_width(260.0),
        );
        if response.changed() {
            app.prefs.endpoint = app.ui_state.endpoint_input.trim().to_string();
        }
    });

    let watermark = app
        .session
        .preview()
        .and_then(|handle| app.session.resolve(&handle));
    let can_submit =
        watermark.is_some() && !app.ui_state.images.is_empty() && !app.ui_state.processing;

    let label = if app.ui_state.processing {
        "Processing..."
    } else {
        "Process Images"
    };
    let clicked = ui.add_enabled(can_submit, egui::Button::new(label)).clicked();
    if watermark.is_none() {
        ui.small("Upload a watermark first.");
    }
    if clicked {
        if let Some(watermark) = watermark {
            app.ui_state.processing = true;
            app.ui_state.last_batch = None;
            app.send_command(WorkerCommand::Submit {
                endpoint: app.prefs.endpoint.clone(),
                watermark,
                config: app.session.config(),
                images: app.ui_state.images.clone(),
            });
        }
    }

    if let Some(batch) = &app.ui_state.last_batch {
        ui.add_space(4.0);
        for outcome in &batch.outcomes {
            match outcome {
                ImageOutcome::Processed { file_name, .. } => {
                    ui.label(format!("\u{2714} {file_name}"));
                }
                ImageOutcome::Failed { file_name, reason } => {
                    ui.label(format!("\u{2716} {file_name}: {reason}"));
                }
            }
        }

        if batch.processed_count() > 0 && ui.button("Save outputs...").clicked() {
            save_outputs(app);
        }
    }
}

fn save_outputs(app: &WotermarkApp) {
    let Some(batch) = &app.ui_state.last_batch else {
        return;
    };
    let outputs: Vec<(String, Vec<u8>)> = batch
        .outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            ImageOutcome::Processed { file_name, bytes } => {
                Some((file_name.clone(), bytes.clone()))
            }
            ImageOutcome::Failed { .. } => None,
        })
        .collect();

    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            let _ = cmd_tx.send(WorkerCommand::SaveOutputs { dir, outputs });
        }
    });
}
