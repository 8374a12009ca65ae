use std::sync::Arc;

use crate::config::WatermarkConfig;

/// The single persisted pairing of watermark image bytes and the
/// configuration active when it was last saved.
#[derive(Clone, Debug, PartialEq)]
pub struct WatermarkRecord {
    pub image_bytes: Arc<[u8]>,
    pub config: WatermarkConfig,
}

impl WatermarkRecord {
    pub fn new(image_bytes: impl Into<Arc<[u8]>>, config: WatermarkConfig) -> Self {
        Self {
            image_bytes: image_bytes.into(),
            config,
        }
    }
}
