use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 3000;
pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Everything the relay reads from the environment. The API key is optional
/// on purpose: without it the server still starts and answers `/chat` with a
/// configuration error instead of crashing.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub api_key: Option<String>,
    pub upstream_url: String,
    pub listen_addr: SocketAddr,
    pub reachable_addr: String,
}

impl RelayConfig {
    pub fn from_env() -> RelayConfig {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let upstream_url =
            std::env::var("UPSTREAM_URL").unwrap_or_else(|_| OPENROUTER_URL.to_string());
        let reachable_addr =
            std::env::var("REACHABLE_ADDR").unwrap_or_else(|_| format!("127.0.0.1:{port}"));

        RelayConfig {
            api_key,
            upstream_url,
            listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            reachable_addr,
        }
    }
}
