use anyhow::anyhow;

/// Process configuration, read once from the environment at startup and
/// passed explicitly into app construction. Immutable afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub completion_api_url: String,
    pub completion_api_key: String,
    pub completion_model_id: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            completion_api_url: require("COMPLETION_API_URL")?,
            completion_api_key: require("COMPLETION_API_KEY")?,
            completion_model_id: std::env::var("COMPLETION_MODEL_ID")
                .unwrap_or_else(|_| "anthropic.claude-v2".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .unwrap_or(3000),
        })
    }
}

fn require(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow!("{name} environment variable must be set"))
}
