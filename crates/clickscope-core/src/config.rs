use std::time::Duration;

pub const DEFAULT_AI_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "mistralai/devstral-2512:free";

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: String,
    pub duckdb_memory_limit: String,
    /// OpenAI-compatible chat-completions endpoint.
    pub ai_api_url: String,
    pub ai_api_key: String,
    pub ai_model: String,
    pub ai_timeout_secs: u64,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let ai_api_url = std::env::var("CLICKSCOPE_AI_API_URL")
            .unwrap_or_else(|_| DEFAULT_AI_API_URL.to_string());
        validate_endpoint(&ai_api_url)?;

        Ok(Self {
            port: std::env::var("CLICKSCOPE_PORT")
                .unwrap_or_else(|_| "8001".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            data_dir: std::env::var("CLICKSCOPE_DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string()),
            duckdb_memory_limit: std::env::var("CLICKSCOPE_DUCKDB_MEMORY")
                .unwrap_or_else(|_| "1GB".to_string()),
            ai_api_url,
            ai_api_key: std::env::var("CLICKSCOPE_AI_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .ok_or_else(|| "CLICKSCOPE_AI_API_KEY must be set".to_string())?,
            ai_model: std::env::var("CLICKSCOPE_AI_MODEL")
                .unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
            ai_timeout_secs: parse_timeout_secs(
                &std::env::var("CLICKSCOPE_AI_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string()),
            )?,
            cors_origins: std::env::var("CLICKSCOPE_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    pub fn db_path(&self) -> String {
        format!("{}/clickscope.db", self.data_dir)
    }
}

/// Generation timeout in whole seconds. Zero would fail every call instantly.
pub fn parse_timeout_secs(raw: &str) -> Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("CLICKSCOPE_AI_TIMEOUT_SECS must be at least 1".to_string()),
        Ok(secs) => Ok(secs),
        Err(e) => Err(format!("invalid CLICKSCOPE_AI_TIMEOUT_SECS: {e}")),
    }
}

/// The generation endpoint must be an absolute http(s) URL.
pub fn validate_endpoint(raw: &str) -> Result<(), String> {
    let parsed =
        url::Url::parse(raw.trim()).map_err(|e| format!("invalid CLICKSCOPE_AI_API_URL: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!(
            "CLICKSCOPE_AI_API_URL must use http or https, got {other}"
        )),
    }
}
