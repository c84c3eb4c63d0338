//! Application layer coordinating state, events, and actions.
//!
//! ```text
//! Key / WebRequestResult → Event → handle_event → controllers → Actions
//!                                        │                        │
//!                                        ▼                        ▼
//!                               compute_viewmodel          web_request
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the event handler
//! - [`feed`]: paginated feed controller with last-request-wins fetching
//! - [`preferences`]: preference snapshot/working-copy reconciliation
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: screen and input mode types
//! - [`state`]: application state and view model computation

pub mod actions;
pub mod feed;
pub mod handler;
pub mod modes;
pub mod preferences;
pub mod state;

pub use actions::Action;
pub use feed::{Completion, FeedController, FeedFetch, LoadState};
pub use handler::{handle_event, Event};
pub use modes::{DateField, InputMode, Screen};
pub use preferences::{PreferenceSyncController, SyncStatus};
pub use state::AppState;
