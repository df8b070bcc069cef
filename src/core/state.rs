use std::sync::Arc;

use crate::core::config::Settings;
use crate::core::identity::IdentityProvider;
use crate::repositories::AssessmentStore;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    store: Arc<dyn AssessmentStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        store: Arc<dyn AssessmentStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self { inner: Arc::new(InnerState { settings, store, identity }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn store(&self) -> &dyn AssessmentStore {
        self.inner.store.as_ref()
    }

    pub(crate) fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }
}
