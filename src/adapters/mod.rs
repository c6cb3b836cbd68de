//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `store` - Document store collections (in-memory)
//! - `events` - Change feed implementations (in-memory)
//! - `auth` - Identity provider implementations (mock)
//! - `clock` - System and fixed clocks

pub mod auth;
pub mod clock;
pub mod events;
pub mod store;

pub use auth::MockIdentityProvider;
pub use clock::{FixedClock, SystemClock};
pub use events::{InMemoryChangeFeed, LOCAL_DATABASE_ID};
pub use store::{InMemoryDocumentStore, StoreOperation};
