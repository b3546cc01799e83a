//! Application state passed into the router.
//!
//! Collaborators are explicitly constructed at startup and injected here,
//! rather than living as process-wide singletons, so tests can build an
//! isolated instance with their own store, storage root, and mail transport.

use std::sync::Arc;

use orderdesk_core::Config;
use orderdesk_db::OrderStore;
use orderdesk_storage::Storage;

use crate::services::notifications::OrderNotifier;

/// Main application state: configuration plus the three collaborators of the
/// submit flow.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orders: Arc<dyn OrderStore>,
    pub storage: Arc<dyn Storage>,
    /// Absent when SMTP is not configured; dispatch is then a logged no-op.
    pub notifier: Option<OrderNotifier>,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
