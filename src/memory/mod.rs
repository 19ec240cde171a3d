//! Memory collection: notes, conversation turns, preferences, and facts

mod item;
mod store;

pub use item::{Importance, MemoryItem, MemoryType};
pub use store::{MemoryStore, TypeFilter};
