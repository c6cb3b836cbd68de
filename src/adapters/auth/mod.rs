//! Identity provider adapters.
//!
//! - `mock` - Test implementation that doesn't require an external service

mod mock;

pub use mock::MockIdentityProvider;
