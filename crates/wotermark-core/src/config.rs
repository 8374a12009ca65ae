use serde::{Deserialize, Serialize};

/// Output raster dimensions and watermark scale submitted with every batch.
///
/// Serialized field names are camelCase to match the processing endpoint's
/// JSON contract.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkConfig {
    pub output_width: u32,
    pub output_height: u32,
    /// Watermark height as a percentage of the output image height, in (0, 100].
    pub watermark_size: f32,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            output_width: 1920,
            output_height: 1080,
            watermark_size: 20.0,
        }
    }
}

impl WatermarkConfig {
    pub fn is_valid(&self) -> bool {
        self.output_width > 0
            && self.output_height > 0
            && valid_watermark_size(self.watermark_size)
    }

    /// Merge a partial update field-wise.
    ///
    /// Each out-of-range field is rejected individually; the previous value
    /// stays authoritative while valid fields in the same update still apply.
    /// Returns whether anything changed.
    pub fn apply(&mut self, update: &ConfigUpdate) -> bool {
        let mut changed = false;

        if let Some(width) = update.output_width {
            if width > 0 && width != self.output_width {
                self.output_width = width;
                changed = true;
            }
        }
        if let Some(height) = update.output_height {
            if height > 0 && height != self.output_height {
                self.output_height = height;
                changed = true;
            }
        }
        if let Some(size) = update.watermark_size {
            if valid_watermark_size(size) && size != self.watermark_size {
                self.watermark_size = size;
                changed = true;
            }
        }

        changed
    }
}

fn valid_watermark_size(size: f32) -> bool {
    size.is_finite() && size > 0.0 && size <= 100.0
}

/// Partial configuration update; `None` fields are left untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigUpdate {
    pub output_width: Option<u32>,
    pub output_height: Option<u32>,
    pub watermark_size: Option<f32>,
}
