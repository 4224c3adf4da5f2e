//! Audio server access: the control tool and the stream inventory parser

pub mod inventory;
pub mod stream;
pub mod tool;

#[cfg(test)]
pub(crate) mod testing;

pub use inventory::StreamInventory;
pub use stream::{parse_listing, StreamKind, StreamRecord};
pub use tool::{AudioTool, Pactl};
