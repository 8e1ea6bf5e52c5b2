use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub banner_path: PathBuf,
    pub currency: String,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_path: None,
            banner_path: PathBuf::from("banner.txt"),
            currency: "MXN".to_string(),
            log_level: "warn".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();
        let config = Config {
            catalog_path: env::var("CATALOG_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            banner_path: env::var("BANNER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.banner_path),
            currency: env::var("CURRENCY").unwrap_or(defaults.currency),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        Ok(config)
    }

    /// Command-line flags win over the environment.
    pub fn with_catalog_path(mut self, path: Option<PathBuf>) -> anyhow::Result<Self> {
        if path.is_some() {
            self.catalog_path = path;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.currency.trim().is_empty() {
            return Err(anyhow::anyhow!("CURRENCY must not be empty"));
        }

        if let Some(path) = &self.catalog_path {
            let is_json = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if !is_json {
                return Err(anyhow::anyhow!(
                    "CATALOG_PATH must point to a .json file, got '{}'",
                    path.display()
                ));
            }
        }

        Ok(())
    }
}
