//! Minder - local-first personal assistant
//!
//! Minder keeps a task list, a memory bank, and a chat surface backed
//! entirely by local storage. There is no server and no network I/O; the
//! "intelligence" is a set of regex classifiers for task detection and
//! priority assignment.
//!
//! ## Architecture
//!
//! ```text
//!  chat surface ──► Classifier ──► TaskStore ──► Storage (assistantTasks)
//!       │                              ▲
//!       └──────────► MemoryStore ──────┼──────► Storage (assistantMemory)
//!                                      │
//!  StatsAggregator ◄── polls durable keys fresh (eventual consistency)
//! ```
//!
//! Both collections persist as full JSON snapshots rewritten after every
//! mutation. The two durable keys are never written transactionally; the
//! stats view reads them fresh on a polling interval and tolerates the lag.
//!
//! ## Modules
//!
//! - [`classifier`]: task detection, priority tiers, canned replies
//! - [`tasks`]: task collection with snapshot persistence
//! - [`memory`]: memory collection with search
//! - [`stats`]: read-only aggregation over both durable keys
//! - [`chat`]: the assistant wiring one message into both stores
//! - [`storage`]: the persistence port and its file/in-memory backends
//! - [`config`]: TOML configuration

pub mod chat;
pub mod classifier;
pub mod config;
pub mod error;
pub mod memory;
pub mod stats;
pub mod storage;
pub mod tasks;

pub use config::MinderConfig;
pub use error::{Error, Result};
