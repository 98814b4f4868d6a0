//! App-level state — the persisted onboarded flag, saved profile, and
//! loading gate, with an event stream for anything that reacts to them.

pub mod model;
pub mod store;
pub mod ws;

pub use model::{AppStateEvent, AppStateSnapshot, StoredAppState};
pub use store::AppStateStore;
pub use ws::event_routes;
