use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config/settings.yaml";

/// Load settings from `config/settings.yaml`, with `.env` and `APP__*` overrides.
pub fn load_app_settings() -> Result<AppSettings> {
    // Load .env first so its values take part in the environment overrides.
    dotenv::from_path(".env").ok();
    load_app_settings_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// Load settings from a specific YAML file, still honouring `APP__*` overrides.
pub fn load_app_settings_from(config_path: &Path) -> Result<AppSettings> {
    let config_path = config_path.canonicalize()?;
    debug!("Loading settings from {}", config_path.display());

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    Ok(raw_settings.into())
}
