//! Document store adapters.
//!
//! - `InMemoryDocumentStore` - Both collections in process memory, with
//!   optional change-feed announcements and failure injection

mod in_memory;

pub use in_memory::{InMemoryDocumentStore, StoreOperation};
