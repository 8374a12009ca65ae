use std::sync::mpsc;
use std::sync::Arc;

use tracing::debug;

use crate::config::{ConfigUpdate, WatermarkConfig};
use crate::record::WatermarkRecord;
use crate::store::WatermarkStore;

/// Opaque handle to the current watermark preview bytes.
///
/// A handle resolves through the session that minted it, and only while it
/// is that session's live handle: replacing or clearing the watermark
/// revokes it, after which `resolve` returns `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewRef {
    id: u64,
}

enum WriterCommand {
    Load(mpsc::Sender<Option<WatermarkRecord>>),
    Save(Option<WatermarkRecord>),
    Sync(mpsc::Sender<()>),
}

/// In-memory authority for the current watermark + configuration.
///
/// Mutations apply synchronously; persistence flows through a dedicated
/// writer thread that owns the store. Commands are applied in submission
/// order, so the last enqueued save is the last applied (last-writer-wins
/// for the single logical slot). Persistence failures never roll back
/// in-memory state: the store is a cache for the next session.
pub struct WatermarkSession {
    config: WatermarkConfig,
    bytes: Option<Arc<[u8]>>,
    live_id: u64,
    /// Set once the user mutates state; a hydration arriving afterwards is
    /// stale and gets dropped instead of clobbering the newer state.
    mutated: bool,
    hydration: Option<mpsc::Receiver<Option<WatermarkRecord>>>,
    writer_tx: mpsc::Sender<WriterCommand>,
}

impl WatermarkSession {
    pub fn new(store: WatermarkStore) -> Self {
        Self {
            config: WatermarkConfig::default(),
            bytes: None,
            live_id: 0,
            mutated: false,
            hydration: None,
            writer_tx: spawn_writer(store),
        }
    }

    pub fn config(&self) -> WatermarkConfig {
        self.config
    }

    pub fn preview(&self) -> Option<PreviewRef> {
        self.bytes.as_ref().map(|_| PreviewRef { id: self.live_id })
    }

    /// Resolve a preview handle to its bytes, or `None` if it was revoked.
    pub fn resolve(&self, preview: &PreviewRef) -> Option<Arc<[u8]>> {
        if preview.id == self.live_id {
            self.bytes.clone()
        } else {
            None
        }
    }

    /// Kick off hydration from the store. Never blocks: the loaded record is
    /// picked up by a later `poll` call. Until then the session reports no
    /// watermark and default config.
    pub fn initialize(&mut self) {
        if self.hydration.is_some() {
            return;
        }
        let (reply_tx, reply_rx) = mpsc::channel();
        let _ = self.writer_tx.send(WriterCommand::Load(reply_tx));
        self.hydration = Some(reply_rx);
    }

    /// Apply a pending hydration result, if one has arrived.
    ///
    /// Returns `true` when state was hydrated from the store. Call this from
    /// the UI loop each frame.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.hydration else {
            return false;
        };
        match rx.try_recv() {
            Ok(loaded) => {
                self.hydration = None;
                if self.mutated {
                    debug!("dropping stale hydration: session already mutated");
                    return false;
                }
                if let Some(record) = loaded {
                    self.bytes = Some(record.image_bytes);
                    self.live_id += 1;
                    self.config = record.config;
                    return true;
                }
                false
            }
            Err(mpsc::TryRecvError::Empty) => false,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.hydration = None;
                false
            }
        }
    }

    /// Install new watermark bytes (or clear with `None`), revoking any
    /// previous preview handle, and enqueue a save of the new state paired
    /// with the current config.
    pub fn set_watermark(&mut self, bytes: Option<Vec<u8>>) {
        self.mutated = true;
        self.live_id += 1;
        self.bytes = bytes.map(Arc::from);
        self.persist_current();
    }

    /// Merge a partial config update. Out-of-range fields are rejected; the
    /// last valid value stays authoritative. The merged config is only
    /// re-persisted while a watermark is present — config alone has nothing
    /// to be keyed to in the store.
    pub fn set_config(&mut self, update: ConfigUpdate) -> bool {
        if !self.config.apply(&update) {
            return false;
        }
        self.mutated = true;
        if self.bytes.is_some() {
            self.persist_current();
        }
        true
    }

    /// Block until every enqueued persistence command has been applied.
    /// Used by tests and on shutdown so the final write lands.
    pub fn settle(&self) {
        let (reply_tx, reply_rx) = mpsc::channel();
        if self.writer_tx.send(WriterCommand::Sync(reply_tx)).is_ok() {
            let _ = reply_rx.recv();
        }
    }

    fn persist_current(&self) {
        let record = self.bytes.as_ref().map(|bytes| WatermarkRecord {
            image_bytes: bytes.clone(),
            config: self.config,
        });
        let _ = self.writer_tx.send(WriterCommand::Save(record));
    }
}

/// Spawn the store writer thread. Returns the command sender; the thread
/// exits when the session (and thus the sender) is dropped.
fn spawn_writer(store: WatermarkStore) -> mpsc::Sender<WriterCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WriterCommand>();

    std::thread::Builder::new()
        .name("wotermark-store".into())
        .spawn(move || {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    WriterCommand::Load(reply) => {
                        let _ = reply.send(store.load());
                    }
                    WriterCommand::Save(record) => {
                        store.save(record.as_ref());
                    }
                    WriterCommand::Sync(reply) => {
                        let _ = reply.send(());
                    }
                }
            }
        })
        .expect("Failed to spawn store writer thread");

    cmd_tx
}
