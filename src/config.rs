use serde::Deserialize;
use std::path::Path;

// ──────────────────────────── TOML structure ────────────────────────────

#[derive(Debug, Deserialize, Clone)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub provider: String,
    #[serde(default)]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub bucket_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    #[serde(default = "default_generation_model")]
    pub model: String,
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

fn default_generation_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_generation_timeout_secs() -> u64 {
    30
}

// ──────────────────────────── Resolved Settings ────────────────────────────

/// Flat settings structure resolved from TOML + environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    // API
    pub host: String,
    pub port: u16,

    // Storage
    pub storage_provider: String,
    pub storage_path: String,
    pub aws_region: Option<String>,
    pub s3_bucket: Option<String>,
    pub aws_access_key: Option<String>,
    pub aws_secret_access_key: Option<String>,

    // Generation
    pub gemini_api_key: Option<String>,
    pub generation_model: String,
    pub generation_timeout_secs: u64,
}

/// Load settings from a given TOML path. Useful for testing.
pub fn load_settings_from_path(path: impl AsRef<Path>) -> anyhow::Result<Settings> {
    // Load .env if present (ignore errors)
    let _ = dotenvy::dotenv();

    let content = std::fs::read_to_string(path.as_ref())?;
    let config: TomlConfig = toml::from_str(&content)?;

    // Storage credentials come from the environment; required for aws-s3.
    let (aws_access_key, aws_secret_access_key, aws_region, s3_bucket) =
        if config.storage.provider == "aws-s3" {
            let ak = std::env::var("AWS_ACCESS_KEY")
                .map_err(|_| anyhow::anyhow!("AWS_ACCESS_KEY required for aws-s3 provider"))?;
            let sk = std::env::var("AWS_SECRET_ACCESS_KEY")
                .map_err(|_| anyhow::anyhow!("AWS_SECRET_ACCESS_KEY required for aws-s3 provider"))?;
            let region = config
                .storage
                .region
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.region required for aws-s3 provider"))?;
            let bucket = config
                .storage
                .bucket_name
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.bucket_name required for aws-s3 provider"))?;
            (Some(ak), Some(sk), Some(region), Some(bucket))
        } else {
            (None, None, None, None)
        };

    // The generation key is optional; routes answer 404 without it.
    let gemini_api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.api.port);

    Ok(Settings {
        host: config.api.host,
        port,
        storage_provider: config.storage.provider,
        storage_path: config
            .storage
            .storage_path
            .unwrap_or_else(|| "./storage".to_string()),
        aws_region,
        s3_bucket,
        aws_access_key,
        aws_secret_access_key,
        gemini_api_key,
        generation_model: config.generation.model,
        generation_timeout_secs: config.generation.timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_local_provider_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[storage]\nprovider = \"local\"\nstorage_path = \"/tmp/blippi-test\"\n"
        )
        .unwrap();

        let settings = load_settings_from_path(file.path()).unwrap();
        assert_eq!(settings.storage_provider, "local");
        assert_eq!(settings.storage_path, "/tmp/blippi-test");
        assert_eq!(settings.host, "0.0.0.0");
        assert!(settings.aws_access_key.is_none());
        assert_eq!(settings.generation_model, "gemini-1.5-flash");
        assert_eq!(settings.generation_timeout_secs, 30);
    }

    #[test]
    fn test_toml_defaults() {
        let config: TomlConfig = toml::from_str("[storage]\nprovider = \"local\"\n").unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.generation.model, "gemini-1.5-flash");
    }
}
