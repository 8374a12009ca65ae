use crate::app::WotermarkApp;
use crate::messages::WorkerCommand;

pub fn show(ui: &mut egui::Ui, app: &mut WotermarkApp) {
    let count = app.ui_state.images.len();
    let status = match count {
        0 => "none queued".to_string(),
        1 => "1 image queued".to_string(),
        n => format!("{n} images queued"),
    };
    super::section_header(ui, "Images", Some(&status));
    ui.add_space(4.0);

    if ui.button("Add images...").clicked() {
        pick_images(app);
    }

    let mut remove: Option<usize> = None;
    for (index, image) in app.ui_state.images.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(&image.file_name);
            ui.small(super::format_size(image.bytes.len()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Remove").clicked() {
                    remove = Some(index);
                }
            });
        });
    }
    if let Some(index) = remove {
        app.ui_state.remove_image(index);
    }

    if count == 0 {
        ui.small("Queue the images the watermark should be applied to.");
    }
}

fn pick_images(app: &WotermarkApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
            .add_filter("All files", &["*"])
            .pick_files()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadImages { paths });
        }
    });
}
