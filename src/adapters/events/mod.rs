//! Change feed adapters.
//!
//! - `InMemoryChangeFeed` - Synchronous, in-process feed for testing

mod in_memory;

pub use in_memory::{InMemoryChangeFeed, LOCAL_DATABASE_ID};
