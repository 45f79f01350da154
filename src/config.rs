use serde::{Deserialize, Serialize};

/// Runtime configuration for both servers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listing URL used when a request does not supply one.
    pub default_listing_url: String,
    /// Outbound identity when the caller does not provide a User-Agent.
    pub user_agent: String,
    /// SQLite database path for the stateful UI server.
    pub db_path: String,
    /// Bind address of the stateful UI server.
    pub web_addr: String,
    /// Bind address of the stateless API server.
    pub api_addr: String,
}

impl Config {
    pub fn load() -> Self {
        // Hardcoded configuration matching the deployed setup.
        Config {
            default_listing_url: "https://www.kingstone.com.tw/book/nnnn".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36".to_string(),
            db_path: "kingstone_books.db".to_string(),
            web_addr: "0.0.0.0:8080".to_string(),
            api_addr: "0.0.0.0:8001".to_string(),
        }
    }
}
