use wotermark_core::api::{ProcessedBatch, SourceImage};
use wotermark_core::config::WatermarkConfig;

/// Overall UI state.
pub struct UIState {
    /// Target images queued for submission.
    pub images: Vec<SourceImage>,

    /// A submission is in flight.
    pub processing: bool,

    /// Outcomes of the last completed submission.
    pub last_batch: Option<ProcessedBatch>,

    /// Raw text of the config inputs. Invalid entries stay visible here
    /// without reaching the session config; the last valid value remains
    /// authoritative until a valid one is typed.
    pub width_input: String,
    pub height_input: String,
    pub size_input: String,

    /// Processing endpoint URL field.
    pub endpoint_input: String,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn new(config: WatermarkConfig, endpoint: &str) -> Self {
        let mut state = Self {
            images: Vec::new(),
            processing: false,
            last_batch: None,
            width_input: String::new(),
            height_input: String::new(),
            size_input: String::new(),
            endpoint_input: endpoint.to_string(),
            log_messages: Vec::new(),
        };
        state.sync_config_inputs(config);
        state
    }

    /// Overwrite the input buffers from an authoritative config (startup and
    /// hydration).
    pub fn sync_config_inputs(&mut self, config: WatermarkConfig) {
        self.width_input = config.output_width.to_string();
        self.height_input = config.output_height.to_string();
        self.size_input = trim_float(config.watermark_size);
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }
}

/// "20" instead of "20.0" for whole-number sizes.
fn trim_float(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
