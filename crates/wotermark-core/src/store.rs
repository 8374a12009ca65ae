use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::{debug, warn};

use crate::config::WatermarkConfig;
use crate::error::{Result, WotermarkError};
use crate::record::WatermarkRecord;

pub const SLOT_MAGIC: &[u8; 9] = b"WOTERMARK";
pub const SLOT_VERSION: u16 = 1;
const SLOT_FILE: &str = "watermark.wmk";

/// File-backed singleton slot for the current watermark.
///
/// The store holds at most one record under a fixed file name inside its
/// directory. The directory is created lazily on first save. Losing the
/// cached watermark is non-fatal (the user can re-upload), so `load` and
/// `save` never raise: failures are logged and degrade to absent / not
/// persisted.
pub struct WatermarkStore {
    dir: PathBuf,
}

impl WatermarkStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Per-user default location for the slot file.
    pub fn default_dir() -> PathBuf {
        let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push("wotermark");
        dir
    }

    fn slot_path(&self) -> PathBuf {
        self.dir.join(SLOT_FILE)
    }

    /// Load the stored record.
    ///
    /// Returns `None` when the slot file is missing, unreadable, carries a
    /// wrong magic or version, is truncated, or holds an out-of-range config.
    pub fn load(&self) -> Option<WatermarkRecord> {
        let path = self.slot_path();
        if !path.exists() {
            debug!("no watermark slot at {}", path.display());
            return None;
        }
        match read_slot(&path) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("failed to load watermark slot {}: {e}", path.display());
                None
            }
        }
    }

    /// Overwrite the slot with `record`, or delete it when `record` is `None`.
    ///
    /// Idempotent; deleting an absent slot is success. Returns whether the
    /// write landed.
    pub fn save(&self, record: Option<&WatermarkRecord>) -> bool {
        let path = self.slot_path();
        let result = match record {
            Some(record) => write_slot(&self.dir, &path, record),
            None => remove_slot(&path),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to save watermark slot {}: {e}", path.display());
                false
            }
        }
    }
}

fn read_slot(path: &Path) -> Result<WatermarkRecord> {
    let data = fs::read(path)?;
    let mut cursor = &data[..];

    let mut magic = [0u8; SLOT_MAGIC.len()];
    cursor.read_exact(&mut magic)?;
    if &magic != SLOT_MAGIC {
        return Err(WotermarkError::InvalidSlot("bad magic".into()));
    }
    let version = cursor.read_u16::<LittleEndian>()?;
    if version != SLOT_VERSION {
        return Err(WotermarkError::InvalidSlot(format!(
            "unsupported version {version}"
        )));
    }

    let output_width = cursor.read_u32::<LittleEndian>()?;
    let output_height = cursor.read_u32::<LittleEndian>()?;
    let watermark_size = cursor.read_f32::<LittleEndian>()?;
    let blob_len = cursor.read_u64::<LittleEndian>()? as usize;
    if cursor.len() != blob_len {
        return Err(WotermarkError::InvalidSlot(format!(
            "blob length mismatch: header says {blob_len}, {} bytes remain",
            cursor.len()
        )));
    }

    let config = WatermarkConfig {
        output_width,
        output_height,
        watermark_size,
    };
    if !config.is_valid() {
        return Err(WotermarkError::InvalidSlot("config out of range".into()));
    }

    Ok(WatermarkRecord::new(cursor.to_vec(), config))
}

fn write_slot(dir: &Path, path: &Path, record: &WatermarkRecord) -> Result<()> {
    fs::create_dir_all(dir)?;

    // Write to a sibling temp file, then rename, so a crash mid-write never
    // leaves a truncated slot.
    let tmp = path.with_extension("wmk.tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        writer.write_all(SLOT_MAGIC)?;
        writer.write_u16::<LittleEndian>(SLOT_VERSION)?;
        writer.write_u32::<LittleEndian>(record.config.output_width)?;
        writer.write_u32::<LittleEndian>(record.config.output_height)?;
        writer.write_f32::<LittleEndian>(record.config.watermark_size)?;
        writer.write_u64::<LittleEndian>(record.image_bytes.len() as u64)?;
        writer.write_all(&record.image_bytes)?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn remove_slot(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
