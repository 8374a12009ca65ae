use std::fs;

use wotermark_core::config::WatermarkConfig;
use wotermark_core::record::WatermarkRecord;
use wotermark_core::store::{WatermarkStore, SLOT_MAGIC};

fn record(bytes: &[u8]) -> WatermarkRecord {
    WatermarkRecord::new(bytes.to_vec(), WatermarkConfig::default())
}

// ---------------------------------------------------------------------------
// Round trip (P1)
// ---------------------------------------------------------------------------

#[test]
fn test_save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());

    let original = WatermarkRecord::new(
        vec![1u8, 2, 3, 4, 5],
        WatermarkConfig {
            output_width: 800,
            output_height: 600,
            watermark_size: 33.0,
        },
    );
    assert!(store.save(Some(&original)));

    let loaded = store.load().expect("record should be present");
    assert_eq!(loaded, original);
}

#[test]
fn test_empty_blob_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());

    let original = record(&[]);
    assert!(store.save(Some(&original)));
    assert_eq!(store.load(), Some(original));
}

// ---------------------------------------------------------------------------
// Deletion (P2)
// ---------------------------------------------------------------------------

#[test]
fn test_save_none_deletes_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());

    assert!(store.save(Some(&record(b"abc"))));
    assert!(store.save(None));
    assert!(store.load().is_none());
}

#[test]
fn test_deleting_absent_slot_is_success() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());
    assert!(store.save(None));
}

// ---------------------------------------------------------------------------
// Idempotence / overwrite (P3)
// ---------------------------------------------------------------------------

#[test]
fn test_saving_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());

    let r = record(b"same bytes");
    assert!(store.save(Some(&r)));
    assert!(store.save(Some(&r)));
    assert_eq!(store.load(), Some(r));

    // Exactly one slot file, no duplicates.
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_overwrite_replaces_previous_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());

    store.save(Some(&record(b"first")));
    let second = record(b"second");
    store.save(Some(&second));
    assert_eq!(store.load(), Some(second));
}

// ---------------------------------------------------------------------------
// Degraded loads
// ---------------------------------------------------------------------------

#[test]
fn test_load_from_empty_store_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());
    assert!(store.load().is_none());
}

#[test]
fn test_load_from_missing_directory_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path().join("never-created"));
    assert!(store.load().is_none());
}

#[test]
fn test_bad_magic_loads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());

    store.save(Some(&record(b"payload")));
    let path = dir.path().join("watermark.wmk");
    let mut data = fs::read(&path).unwrap();
    data[0] ^= 0xff;
    fs::write(&path, data).unwrap();

    assert!(store.load().is_none());
}

#[test]
fn test_unsupported_version_loads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());

    store.save(Some(&record(b"payload")));
    let path = dir.path().join("watermark.wmk");
    let mut data = fs::read(&path).unwrap();
    // Version is the u16 right after the magic.
    data[SLOT_MAGIC.len()] = 99;
    fs::write(&path, data).unwrap();

    assert!(store.load().is_none());
}

#[test]
fn test_truncated_slot_loads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());

    store.save(Some(&record(b"a longer payload to truncate")));
    let path = dir.path().join("watermark.wmk");
    let data = fs::read(&path).unwrap();
    fs::write(&path, &data[..data.len() - 5]).unwrap();

    assert!(store.load().is_none());
}

#[test]
fn test_garbage_slot_loads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path()).unwrap();
    fs::write(dir.path().join("watermark.wmk"), b"not a slot file").unwrap();

    let store = WatermarkStore::new(dir.path());
    assert!(store.load().is_none());
}

#[test]
fn test_out_of_range_config_loads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = WatermarkStore::new(dir.path());

    store.save(Some(&record(b"payload")));
    let path = dir.path().join("watermark.wmk");
    let mut data = fs::read(&path).unwrap();
    // Zero out output_width (u32 after magic + u16 version).
    let offset = SLOT_MAGIC.len() + 2;
    data[offset..offset + 4].copy_from_slice(&0u32.to_le_bytes());
    fs::write(&path, data).unwrap();

    assert!(store.load().is_none());
}

// ---------------------------------------------------------------------------
// Failure degradation
// ---------------------------------------------------------------------------

#[test]
fn test_save_creates_store_directory_lazily() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("deep").join("store");
    let store = WatermarkStore::new(&nested);

    assert!(store.save(Some(&record(b"bytes"))));
    assert!(nested.join("watermark.wmk").exists());
}

#[cfg(unix)]
#[test]
fn test_save_to_unwritable_directory_returns_false() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let mut perms = fs::metadata(dir.path()).unwrap().permissions();
    perms.set_mode(0o555);
    fs::set_permissions(dir.path(), perms.clone()).unwrap();

    let store = WatermarkStore::new(dir.path());
    assert!(!store.save(Some(&record(b"bytes"))));

    perms.set_mode(0o755);
    fs::set_permissions(dir.path(), perms).unwrap();
}
