use clap::Args;
use tasklist_service::HttpService;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5050/api";

/// Client settings, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base address of the todo API, including the /api prefix
    #[arg(long = "api-url", env = "TASKLIST_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn http_service(&self) -> HttpService {
        HttpService::new(&self.api_url)
    }
}
