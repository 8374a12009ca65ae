use wotermark_core::config::{ConfigUpdate, WatermarkConfig};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_config() {
    let config = WatermarkConfig::default();
    assert_eq!(config.output_width, 1920);
    assert_eq!(config.output_height, 1080);
    assert_eq!(config.watermark_size, 20.0);
    assert!(config.is_valid());
}

// ---------------------------------------------------------------------------
// Partial merge
// ---------------------------------------------------------------------------

#[test]
fn test_apply_single_field() {
    let mut config = WatermarkConfig::default();
    let changed = config.apply(&ConfigUpdate {
        output_width: Some(800),
        ..Default::default()
    });
    assert!(changed);
    assert_eq!(config.output_width, 800);
    assert_eq!(config.output_height, 1080);
    assert_eq!(config.watermark_size, 20.0);
}

#[test]
fn test_apply_all_fields() {
    let mut config = WatermarkConfig::default();
    let changed = config.apply(&ConfigUpdate {
        output_width: Some(640),
        output_height: Some(480),
        watermark_size: Some(35.5),
    });
    assert!(changed);
    assert_eq!(config.output_width, 640);
    assert_eq!(config.output_height, 480);
    assert_eq!(config.watermark_size, 35.5);
}

#[test]
fn test_apply_empty_update_is_noop() {
    let mut config = WatermarkConfig::default();
    assert!(!config.apply(&ConfigUpdate::default()));
    assert_eq!(config, WatermarkConfig::default());
}

#[test]
fn test_apply_same_value_reports_unchanged() {
    let mut config = WatermarkConfig::default();
    let changed = config.apply(&ConfigUpdate {
        output_width: Some(1920),
        ..Default::default()
    });
    assert!(!changed);
}

// ---------------------------------------------------------------------------
// Bounds (P6)
// ---------------------------------------------------------------------------

#[test]
fn test_watermark_size_zero_rejected() {
    let mut config = WatermarkConfig::default();
    let changed = config.apply(&ConfigUpdate {
        watermark_size: Some(0.0),
        ..Default::default()
    });
    assert!(!changed);
    assert_eq!(config.watermark_size, 20.0);
}

#[test]
fn test_watermark_size_above_100_rejected() {
    let mut config = WatermarkConfig::default();
    let changed = config.apply(&ConfigUpdate {
        watermark_size: Some(101.0),
        ..Default::default()
    });
    assert!(!changed);
    assert_eq!(config.watermark_size, 20.0);
}

#[test]
fn test_watermark_size_100_accepted() {
    let mut config = WatermarkConfig::default();
    let changed = config.apply(&ConfigUpdate {
        watermark_size: Some(100.0),
        ..Default::default()
    });
    assert!(changed);
    assert_eq!(config.watermark_size, 100.0);
}

#[test]
fn test_watermark_size_50_accepted() {
    let mut config = WatermarkConfig::default();
    assert!(config.apply(&ConfigUpdate {
        watermark_size: Some(50.0),
        ..Default::default()
    }));
    assert_eq!(config.watermark_size, 50.0);
}

#[test]
fn test_watermark_size_nan_rejected() {
    let mut config = WatermarkConfig::default();
    let changed = config.apply(&ConfigUpdate {
        watermark_size: Some(f32::NAN),
        ..Default::default()
    });
    assert!(!changed);
    assert_eq!(config.watermark_size, 20.0);
}

#[test]
fn test_zero_dimensions_rejected() {
    let mut config = WatermarkConfig::default();
    let changed = config.apply(&ConfigUpdate {
        output_width: Some(0),
        output_height: Some(0),
        ..Default::default()
    });
    assert!(!changed);
    assert_eq!(config.output_width, 1920);
    assert_eq!(config.output_height, 1080);
}

#[test]
fn test_invalid_field_does_not_block_valid_field() {
    let mut config = WatermarkConfig::default();
    let changed = config.apply(&ConfigUpdate {
        output_width: Some(0),
        output_height: Some(720),
        ..Default::default()
    });
    assert!(changed);
    assert_eq!(config.output_width, 1920);
    assert_eq!(config.output_height, 720);
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[test]
fn test_json_field_names_are_camel_case() {
    let config = WatermarkConfig::default();
    let value = serde_json::to_value(config).unwrap();
    assert_eq!(value["outputWidth"], 1920);
    assert_eq!(value["outputHeight"], 1080);
    assert_eq!(value["watermarkSize"], 20.0);
}

#[test]
fn test_json_round_trip() {
    let config = WatermarkConfig {
        output_width: 800,
        output_height: 600,
        watermark_size: 12.5,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: WatermarkConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
