//! Task collection: to-do records with completion state and priority

mod store;
mod task;

pub use store::TaskStore;
pub use task::{Priority, Task};
