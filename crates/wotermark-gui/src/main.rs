mod app;
mod convert;
mod messages;
mod panels;
mod prefs;
mod state;
mod worker;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([720.0, 540.0])
            .with_title("Wotermark"),
        ..Default::default()
    };

    eframe::run_native(
        "Wotermark",
        options,
        Box::new(|cc| Ok(Box::new(app::WotermarkApp::new(&cc.egui_ctx)))),
    )
}
