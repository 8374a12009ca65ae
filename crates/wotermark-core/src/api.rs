use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::WatermarkConfig;
use crate::error::{Result, WotermarkError};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";
const PROCESS_PATH: &str = "/api/process-images";

/// One image queued for submission, carrying its original file name.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Wire shape of the processing endpoint's response.
///
/// `images` holds base64-encoded output data, positionally aligned with the
/// submitted images; `errors` holds per-image failure messages. Entries are
/// null for the other side of each pair.
#[derive(Debug, Deserialize)]
pub struct ProcessResponse {
    pub images: Vec<Option<String>>,
    pub errors: Vec<Option<String>>,
}

/// Per-image result after decoding the response.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageOutcome {
    Processed { file_name: String, bytes: Vec<u8> },
    Failed { file_name: String, reason: String },
}

impl ImageOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Processed { file_name, .. } | Self::Failed { file_name, .. } => file_name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessedBatch {
    pub outcomes: Vec<ImageOutcome>,
}

impl ProcessedBatch {
    /// Pair each submitted image with its response entry.
    ///
    /// Misaligned arrays, missing entries, and base64 decode failures all
    /// surface as per-image failures rather than a batch error.
    pub fn from_response(sources: &[SourceImage], response: &ProcessResponse) -> Self {
        let mut outcomes = Vec::with_capacity(sources.len());
        for (index, source) in sources.iter().enumerate() {
            let error = response.errors.get(index).cloned().flatten();
            let image = response.images.get(index).cloned().flatten();

            let outcome = if let Some(reason) = error {
                ImageOutcome::Failed {
                    file_name: source.file_name.clone(),
                    reason,
                }
            } else if let Some(encoded) = image {
                match BASE64.decode(encoded.as_bytes()) {
                    Ok(bytes) => ImageOutcome::Processed {
                        file_name: output_file_name(&source.file_name),
                        bytes,
                    },
                    Err(e) => ImageOutcome::Failed {
                        file_name: source.file_name.clone(),
                        reason: format!("invalid base64 in response: {e}"),
                    },
                }
            } else {
                ImageOutcome::Failed {
                    file_name: source.file_name.clone(),
                    reason: "missing from response".into(),
                }
            };
            outcomes.push(outcome);
        }
        Self { outcomes }
    }

    pub fn processed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ImageOutcome::Processed { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.processed_count()
    }
}

/// `photo.jpg` -> `photo_watermarked.jpg`.
pub fn output_file_name(input: &str) -> String {
    match input.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_watermarked.{ext}"),
        _ => format!("{input}_watermarked"),
    }
}

/// Blocking client for the external compositing endpoint.
///
/// The endpoint is an opaque HTTP collaborator: one multipart POST per
/// batch, no retry. Run calls off the UI thread.
pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Submit the watermark, its config, and a batch of images for
    /// server-side compositing.
    pub fn process_images(
        &self,
        watermark: &[u8],
        config: &WatermarkConfig,
        images: &[SourceImage],
    ) -> Result<ProcessedBatch> {
        let config_json = serde_json::to_string(config)?;

        let mut form = Form::new()
            .part("watermark", Part::bytes(watermark.to_vec()).file_name("watermark"))
            .text("watermarkConfig", config_json);
        for (index, image) in images.iter().enumerate() {
            form = form.part(
                format!("images[{index}]"),
                Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
            );
        }

        let url = format!("{}{PROCESS_PATH}", self.base_url);
        info!("submitting {} images to {url}", images.len());

        let response = self.client.post(&url).multipart(form).send()?;
        if !response.status().is_success() {
            return Err(WotermarkError::InvalidResponse(format!(
                "processing endpoint returned {}",
                response.status()
            )));
        }

        let parsed: ProcessResponse = response.json()?;
        if parsed.images.len() != images.len() || parsed.errors.len() != images.len() {
            warn!(
                "response arrays misaligned: {} images, {} errors, {} submitted",
                parsed.images.len(),
                parsed.errors.len(),
                images.len()
            );
        }

        Ok(ProcessedBatch::from_response(images, &parsed))
    }
}
