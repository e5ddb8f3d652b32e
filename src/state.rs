use crate::infrastructure::access_log::ChannelAccessLog;
use crate::resolver::RedirectResolver;

#[derive(Clone)]
pub struct AppState {
    pub resolver: RedirectResolver,
    /// Queue feeding the access log worker; reported by the health check.
    pub access_log: Option<ChannelAccessLog>,
    /// Read client IPs from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        resolver: RedirectResolver,
        access_log: Option<ChannelAccessLog>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            resolver,
            access_log,
            behind_proxy,
        }
    }
}
