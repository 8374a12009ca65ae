use std::path::PathBuf;
use std::sync::Arc;

use wotermark_core::api::{ProcessedBatch, SourceImage};
use wotermark_core::config::WatermarkConfig;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Read a watermark image file from disk.
    LoadWatermark { path: PathBuf },

    /// Read a batch of target image files from disk.
    LoadImages { paths: Vec<PathBuf> },

    /// Submit the watermark + config + images to the processing endpoint.
    Submit {
        endpoint: String,
        watermark: Arc<[u8]>,
        config: WatermarkConfig,
        images: Vec<SourceImage>,
    },

    /// Write processed outputs into a directory chosen by the user.
    SaveOutputs {
        dir: PathBuf,
        outputs: Vec<(String, Vec<u8>)>,
    },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    WatermarkLoaded {
        bytes: Vec<u8>,
    },
    ImagesLoaded {
        images: Vec<SourceImage>,
    },

    /// Submission finished; per-image outcomes inside.
    SubmitComplete {
        batch: ProcessedBatch,
    },

    OutputsSaved {
        dir: PathBuf,
        count: usize,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
