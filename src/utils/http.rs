use anyhow::Result;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Shared outbound HTTP client. The default User-Agent is the identity used
/// by the web UI server; the API server overrides it per request with the
/// caller's own header.
pub fn create_client(user_agent: &str) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(25))
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}
