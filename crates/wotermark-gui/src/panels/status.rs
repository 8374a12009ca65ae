use crate::app::WotermarkApp;

pub fn show(ctx: &egui::Context, app: &mut WotermarkApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if app.ui_state.processing {
            ui.add(
                egui::ProgressBar::new(0.0)
                    .text("Processing images...")
                    .animate(true),
            );
        } else {
            // Invisible placeholder — same height, no animation
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area — fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let config = app.session.config();
            ui.label(format!(
                "Output: {}x{}",
                config.output_width, config.output_height
            ));
            ui.separator();
            ui.label(format!("Watermark: {}%", config.watermark_size));
            ui.separator();
            ui.label(format!("{} images queued", app.ui_state.images.len()));
        });

        ui.add_space(2.0);
    });
}
