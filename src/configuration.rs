use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub app_host: String,
    pub app_port: u16,
    pub allowed_origins: String,
    pub database: DatabaseSettings,
    pub comparison: ComparisonSettings,
    pub ingestion: IngestionSettings,
    #[serde(skip)]
    pub vk: VkSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ComparisonSettings {
    /// Half-width of the price band, in whole rubles.
    pub price_range: i64,
    pub result_limit: i64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct IngestionSettings {
    pub min_price: i64,
    pub item_limit: i64,
}

#[derive(Debug, Clone, Default)]
pub struct VkSettings {
    pub token: String,
    pub api_version: String,
}

impl VkSettings {
    // Token never lives in the config file, only in the environment.
    pub fn from_env() -> Self {
        let token = std::env::var("VK_TOKEN").unwrap_or_default();
        let api_version =
            std::env::var("VK_API_VERSION").unwrap_or_else(|_| "5.199".to_string());

        VkSettings { token, api_version }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .set_default("app_host", "127.0.0.1")?
        .set_default("app_port", 8000)?
        .set_default("allowed_origins", "*")?
        .set_default("database.path", "pc_builds.db")?
        .set_default("comparison.price_range", 50_000)?
        .set_default("comparison.result_limit", 20)?
        .set_default("ingestion.min_price", 40_000)?
        .set_default("ingestion.item_limit", 1_000)?
        // Optional `configuration` file (.json, .toml, .yaml, .yml)
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("COMPARATOR").separator("__"),
        )
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;
    config.vk = VkSettings::from_env();

    Ok(config)
}
