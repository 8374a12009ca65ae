use wotermark_core::config::ConfigUpdate;

use crate::app::WotermarkApp;
use crate::messages::WorkerCommand;

pub fn show(ui: &mut egui::Ui, app: &mut WotermarkApp) {
    let status = if app.preview_texture.is_some() {
        "watermark set"
    } else {
        "no watermark"
    };
    super::section_header(ui, "Watermark Image", Some(status));
    ui.add_space(4.0);

    if app.preview_texture.is_some() {
        let mut remove = false;
        if let Some(texture) = &app.preview_texture {
            ui.add(
                egui::Image::new(texture)
                    .max_height(220.0)
                    .max_width(ui.available_width()),
            );
            remove = ui.button("Remove").clicked();
        }
        if remove {
            app.session.set_watermark(None);
            app.preview_texture = None;
            app.ui_state.add_log("Watermark removed".into());
        }
    } else {
        if ui.button("Choose watermark...").clicked() {
            pick_watermark(app);
        }
        ui.small("PNG, JPEG, or WebP");
    }

    ui.add_space(8.0);
    super::section_header(ui, "Output", None);
    ui.add_space(4.0);

    let config = app.session.config();

    ui.horizontal(|ui| {
        ui.label("Width (px)");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.width_input).desired_width(70.0),
        );
        if response.changed() {
            if let Ok(width) = app.ui_state.width_input.trim().parse::<u32>() {
                app.session.set_config(ConfigUpdate {
                    output_width: Some(width),
                    ..Default::default()
                });
            }
        }

        ui.label("Height (px)");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.height_input).desired_width(70.0),
        );
        if response.changed() {
            if let Ok(height) = app.ui_state.height_input.trim().parse::<u32>() {
                app.session.set_config(ConfigUpdate {
                    output_height: Some(height),
                    ..Default::default()
                });
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Watermark size (% of height)");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.size_input).desired_width(70.0),
        );
        if response.changed() {
            if let Ok(size) = app.ui_state.size_input.trim().parse::<f32>() {
                app.session.set_config(ConfigUpdate {
                    watermark_size: Some(size),
                    ..Default::default()
                });
            }
        }
    });

    // An invalid entry stays visible in the field; the session keeps the
    // last valid value. Surface what will actually be submitted.
    let effective = app.session.config();
    if effective != config || inputs_diverge(app, &effective) {
        ui.small(format!(
            "Effective: {}x{}, watermark {}%",
            effective.output_width, effective.output_height, effective.watermark_size
        ));
    }
}

fn inputs_diverge(app: &WotermarkApp, config: &wotermark_core::config::WatermarkConfig) -> bool {
    app.ui_state.width_input.trim().parse::<u32>() != Ok(config.output_width)
        || app.ui_state.height_input.trim().parse::<u32>() != Ok(config.output_height)
        || app.ui_state.size_input.trim().parse::<f32>() != Ok(config.watermark_size)
}

fn pick_watermark(app: &WotermarkApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadWatermark { path });
        }
    });
}
