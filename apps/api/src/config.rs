use anyhow::{bail, Context, Result};

const DEFAULT_APILAYER_URL: &str = "https://api.apilayer.com/resume_parser/upload";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Which backend handles uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserBackend {
    Heuristic,
    ApiLayer,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub parser_backend: ParserBackend,
    /// Required when `parser_backend` is `ApiLayer`.
    pub apilayer_api_key: Option<String>,
    pub apilayer_url: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let parser_backend = match var("PARSER_BACKEND")
            .unwrap_or_else(|| "heuristic".to_string())
            .to_lowercase()
            .as_str()
        {
            "heuristic" => ParserBackend::Heuristic,
            "apilayer" => ParserBackend::ApiLayer,
            other => bail!("PARSER_BACKEND must be 'heuristic' or 'apilayer', got '{other}'"),
        };

        let apilayer_api_key = var("APILAYER_API_KEY").filter(|k| !k.trim().is_empty());
        if parser_backend == ParserBackend::ApiLayer && apilayer_api_key.is_none() {
            bail!("APILAYER_API_KEY is required when PARSER_BACKEND=apilayer");
        }

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            parser_backend,
            apilayer_api_key,
            apilayer_url: var("APILAYER_URL").unwrap_or_else(|| DEFAULT_APILAYER_URL.to_string()),
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

#[cfg(test)]
impl Config {
    pub(crate) fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/resume_test".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            parser_backend: ParserBackend::Heuristic,
            apilayer_api_key: None,
            apilayer_url: DEFAULT_APILAYER_URL.to_string(),
            max_upload_bytes: 64 * 1024,
        }
    }
}
