use serde_json::Value;

use crate::blocks::Block;
use crate::document::{BlockRecord, Document};

/// A block whose `save` failed while taking a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFailure {
    pub index: usize,
    pub block_type: String,
    pub error: String,
}

/// Document value computed from every live block, plus any per-block save failures.
///
/// A failed block keeps its last successfully saved data so the document never
/// loses a block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub document: Document,
    pub failures: Vec<SaveFailure>,
}

impl Snapshot {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A live block as seen by the snapshot pass
pub(crate) trait SnapshotSource {
    fn id(&self) -> Option<&str>;
    fn block_type(&self) -> &'static str;
    fn instance(&self) -> &dyn Block;
    fn last_saved(&mut self) -> &mut Value;
}

/// Save every block in order. One `save` per block; nothing is skipped.
pub(crate) fn take<S: SnapshotSource>(blocks: &mut [S]) -> Snapshot {
    let mut records = Vec::with_capacity(blocks.len());
    let mut failures = Vec::new();

    for (index, block) in blocks.iter_mut().enumerate() {
        let block_type = block.block_type();
        let saved = block.instance().save();
        let data = match saved {
            Ok(data) => {
                *block.last_saved() = data.clone();
                data
            }
            Err(e) => {
                log::warn!("Block {index} ({block_type}) failed to save: {e}");
                failures.push(SaveFailure {
                    index,
                    block_type: block_type.to_string(),
                    error: e.to_string(),
                });
                block.last_saved().clone()
            }
        };
        records.push(BlockRecord {
            id: block.id().map(str::to_string),
            block_type: block_type.to_string(),
            data,
        });
    }

    Snapshot {
        document: Document::new(records),
        failures,
    }
}
