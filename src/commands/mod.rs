pub mod browse;
pub mod calendar;
pub mod event;
pub mod login;
pub mod logout;
pub mod reference;
pub mod upcoming;

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use portal_core::PortalError;
use portal_core::config::PortalConfig;
use portal_core::session::Session;
use portal_core::today::TodayAnchor;

use crate::client::ApiClient;

/// Everything a command needs, resolved once in `main` and passed down.
pub struct Context {
    pub config: PortalConfig,
    pub client: Arc<ApiClient>,
    pub today: TodayAnchor,
}

impl Context {
    /// `today` from the command line overrides the configured anchor.
    pub fn load(config: PortalConfig, today: Option<NaiveDate>) -> Result<Self> {
        let session = match Session::load() {
            Ok(session) => Some(session),
            Err(PortalError::NotLoggedIn) => None,
            Err(e) => return Err(e.into()),
        };
        let client = Arc::new(ApiClient::new(&config.api_url, session)?);
        let today = match today {
            Some(date) => TodayAnchor::Fixed(date),
            None => config.today_anchor(),
        };
        if today.is_fixed() {
            tracing::debug!(today = %today.date(), "using pinned date as today");
        }

        Ok(Context {
            config,
            client,
            today,
        })
    }
}
