use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{HttpItemsApi, ItemsApi};
use crate::config::Config;
use crate::poll::PollConfig;
use crate::session::SessionContext;

pub struct AppContext {
    pub api: Arc<dyn ItemsApi>,
    pub session: SessionContext,
    pub poll: PollConfig,
    authenticated: bool,
}

impl AppContext {
    pub fn new(config: &Config) -> Self {
        let poll = config.poll.to_poll_config();
        let api: Arc<dyn ItemsApi> = Arc::new(HttpItemsApi::new(
            &config.api.base_url,
            config.api.auth_token.clone(),
            poll.request_timeout,
        ));

        Self {
            api,
            session: SessionContext::new(),
            poll,
            authenticated: config.api.auth_token.is_some(),
        }
    }

    /// Construct with an injected API client (tests, fakes).
    pub fn with_api(api: Arc<dyn ItemsApi>, poll: PollConfig) -> Self {
        Self {
            api,
            session: SessionContext::new(),
            poll,
            authenticated: true,
        }
    }

    /// Fire the once-per-session user sync. Fire-and-forget: failures are
    /// logged and the next session retries; nothing is surfaced to the user.
    pub async fn sync_user_once(&self) {
        if !self.authenticated || self.session.user_synced() {
            return;
        }

        match self.api.sync_user().await {
            Ok(()) => {
                debug!("user synced");
                self.session.mark_user_synced();
            }
            Err(err) => warn!(error = %err, "user sync failed"),
        }
    }
}
