use crate::adapters::{FileFetcher, GraphqlFetcher, SourceFetcher};
use crate::core::metadata::DEFAULT_SITE_NAME;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PageError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_CONTENT_DIR: &str = "./content";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub source: SourceConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Graphql,
    #[default]
    File,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub r#type: SourceType,
    pub endpoint: Option<String>,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub content_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PageError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PageError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CONTENT_TOKEN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PageError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("site.name", &self.site.name)?;
        validation::validate_range("source.timeout_seconds", self.timeout_seconds(), 1, 300)?;

        match self.source.r#type {
            SourceType::Graphql => {
                let endpoint = validation::validate_required_field("source.endpoint", &self.source.endpoint)?;
                validation::validate_url("source.endpoint", endpoint)?;

                if let Some(token) = &self.source.access_token {
                    if token.contains("${") {
                        return Err(PageError::ConfigValidationError {
                            field: "source.access_token".to_string(),
                            message: format!("unresolved environment variable in {}", token),
                        });
                    }
                }
            }
            SourceType::File => {
                validation::validate_path("source.content_dir", self.content_dir())?;
            }
        }

        Ok(())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn content_dir(&self) -> &str {
        self.source.content_dir.as_deref().unwrap_or(DEFAULT_CONTENT_DIR)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    /// 依 source.type 建立對應的 fetcher
    pub fn build_fetcher(&self) -> Result<SourceFetcher> {
        match self.source.r#type {
            SourceType::Graphql => {
                let endpoint = validation::validate_required_field("source.endpoint", &self.source.endpoint)?;
                let fetcher = GraphqlFetcher::new(
                    endpoint.clone(),
                    self.source.access_token.clone(),
                    Duration::from_secs(self.timeout_seconds()),
                )?;
                Ok(SourceFetcher::Graphql(fetcher))
            }
            SourceType::File => Ok(SourceFetcher::File(FileFetcher::new(self.content_dir()))),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn site_name(&self) -> &str {
        &self.site.name
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
