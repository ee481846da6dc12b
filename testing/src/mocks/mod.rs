//! Mock implementations of the client's collaborators
//!
//! - [`MockConduitApi`]: in-memory backend implementing `ConduitApi`
//! - [`MemoryStorage`]: shared in-memory durable storage
//!
//! The location bar mock, `MemoryLocation`, lives in `conduit-core` because
//! the terminal shell uses it too.

mod api;
mod storage;

pub use api::{FIXTURE_PASSWORD, MockConduitApi};
pub use storage::MemoryStorage;
