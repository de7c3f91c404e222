use serde_json::Value;

use super::MountError;
use crate::blocks::{ApiHandle, BlockInit};
use crate::document::{BlockRecord, Document};
use crate::registry::BlockRegistry;
use crate::view::{BlockView, Surface};

/// Views to show in place of a document that failed to mount.
///
/// The offending block becomes an error surface carrying the mount error. Every
/// other block is rendered read-only on its own when its tool allows it, so the
/// rest of the article stays visible.
pub fn fallback_surfaces(
    document: &Document,
    registry: &BlockRegistry,
    error: &MountError,
) -> Vec<BlockView> {
    document
        .blocks
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let surface = if error.index() == Some(index) {
                Surface::Error {
                    block_type: record.block_type.clone(),
                    message: error.to_string(),
                }
            } else {
                render_alone(record, registry)
            };
            BlockView {
                index,
                id: record.id.clone(),
                block_type: record.block_type.clone(),
                surface,
            }
        })
        .collect()
}

fn render_alone(record: &BlockRecord, registry: &BlockRegistry) -> Surface {
    let unavailable = |message: &str| Surface::Error {
        block_type: record.block_type.clone(),
        message: message.to_string(),
    };

    let Some(tool) = registry.get(&record.block_type) else {
        return unavailable("unknown block type");
    };
    if !tool.is_read_only_supported() {
        return unavailable("block cannot be previewed");
    }

    let data: Value = record.data.clone();
    match tool.construct(BlockInit::new(data, ApiHandle::default(), true)) {
        Ok(mut instance) => {
            let surface = instance.render();
            instance.destroy();
            surface
        }
        Err(e) => unavailable(&e.to_string()),
    }
}
