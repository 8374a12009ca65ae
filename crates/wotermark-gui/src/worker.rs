use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;

use wotermark_core::api::{ApiClient, SourceImage};
use wotermark_core::config::WatermarkConfig;

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
///
/// File reads and the HTTP submission run here so the UI thread never
/// blocks on disk or network.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("wotermark-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadWatermark { path } => {
                handle_load_watermark(&path, &tx, &ctx);
            }
            WorkerCommand::LoadImages { paths } => {
                handle_load_images(&paths, &tx, &ctx);
            }
            WorkerCommand::Submit {
                endpoint,
                watermark,
                config,
                images,
            } => {
                handle_submit(&endpoint, &watermark, &config, &images, &tx, &ctx);
            }
            WorkerCommand::SaveOutputs { dir, outputs } => {
                handle_save_outputs(&dir, &outputs, &tx, &ctx);
            }
        }
    }
}

fn handle_load_watermark(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match fs::read(path) {
        Ok(bytes) => send(tx, ctx, WorkerResult::WatermarkLoaded { bytes }),
        Err(e) => send_error(tx, ctx, format!("Failed to read {}: {e}", path.display())),
    }
}

fn handle_load_images(paths: &[PathBuf], tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        match fs::read(path) {
            Ok(bytes) => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "image".into());
                images.push(SourceImage { file_name, bytes });
            }
            Err(e) => send_log(tx, ctx, format!("Skipped {}: {e}", path.display())),
        }
    }
    if !images.is_empty() {
        send(tx, ctx, WorkerResult::ImagesLoaded { images });
    }
}

fn handle_submit(
    endpoint: &str,
    watermark: &Arc<[u8]>,
    config: &WatermarkConfig,
    images: &[SourceImage],
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    send_log(tx, ctx, format!("Submitting {} images...", images.len()));
    let client = ApiClient::new(endpoint);
    match client.process_images(watermark, config, images) {
        Ok(batch) => send(tx, ctx, WorkerResult::SubmitComplete { batch }),
        Err(e) => send_error(tx, ctx, format!("Processing failed: {e}")),
    }
}

fn handle_save_outputs(
    dir: &Path,
    outputs: &[(String, Vec<u8>)],
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let mut count = 0;
    for (file_name, bytes) in outputs {
        let path = dir.join(file_name);
        match fs::write(&path, bytes) {
            Ok(()) => count += 1,
            Err(e) => send_log(tx, ctx, format!("Failed to write {}: {e}", path.display())),
        }
    }
    send(
        tx,
        ctx,
        WorkerResult::OutputsSaved {
            dir: dir.to_path_buf(),
            count,
        },
    );
}
