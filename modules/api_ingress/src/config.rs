use serde::{Deserialize, Serialize};

/// `modules.api_ingress` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ApiIngressConfig {
    /// `host:port`; empty falls back to `server.host:server.port`.
    pub bind_addr: String,
    pub cors_enabled: bool,
    pub body_limit_bytes: usize,
    pub request_timeout_secs: u64,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: String::new(),
            cors_enabled: false,
            body_limit_bytes: 1024 * 1024,
            request_timeout_secs: 30,
        }
    }
}
