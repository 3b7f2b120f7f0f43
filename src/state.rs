use std::sync::Arc;

use crate::auth::AuthService;
use crate::store::Store;

/// Shared application state, injected into every handler via `web::Data`.
///
/// The store handle is explicit rather than global; it is created once at
/// startup and dropped at shutdown.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub auth: AuthService,
    /// Whether the session cookie carries the `Secure` flag.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, auth: AuthService, cookie_secure: bool) -> Self {
        Self {
            store,
            auth,
            cookie_secure,
        }
    }
}
