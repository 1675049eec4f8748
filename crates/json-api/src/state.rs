//! State

use std::sync::Arc;

use quire_app::context::AppContext;

use crate::auth::CookieSettings;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) cookies: CookieSettings,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, cookies: CookieSettings) -> Self {
        Self { app, cookies }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, cookies: CookieSettings) -> Arc<Self> {
        Arc::new(Self::new(app, cookies))
    }
}
