//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Document Store Ports
//!
//! - `HabitRepository` - Habits collection (list/create/update/delete)
//! - `CompletionRepository` - Completions collection (list/create)
//! - `ChangeFeed` - Real-time create/update/delete notifications per collection
//! - `ChangeHandler` - Handler that processes incoming change events
//!
//! ## Session Ports
//!
//! - `IdentityProvider` - Sign-in, sign-up, sign-out, current-user lookup
//! - `Clock` - Source of "now", and through it of "today"

mod change_feed;
mod clock;
mod completion_repository;
mod habit_repository;
mod identity_provider;

pub use change_feed::{ChangeFeed, ChangeHandler, Subscription};
pub use clock::Clock;
pub use completion_repository::CompletionRepository;
pub use habit_repository::HabitRepository;
pub use identity_provider::IdentityProvider;
