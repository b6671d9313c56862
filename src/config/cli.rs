use crate::config::toml_config::{SourceType, TomlConfig};
use crate::domain::model::Route;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "microsite-pages")]
#[command(about = "Resolve a microsite route into a page render instruction")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Page slug; omit for the home page
    #[arg(long)]
    pub slug: Option<String>,

    /// Sub-category such as "speakers" or "news"
    #[arg(long)]
    pub category: Option<String>,

    /// Read content from this fixture directory instead of the configured source
    #[arg(long)]
    pub content_dir: Option<String>,

    /// Query this GraphQL endpoint instead of the configured source
    #[arg(long, conflicts_with = "content_dir")]
    pub endpoint: Option<String>,

    /// Show the route decision and query without fetching
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn route(&self) -> Route {
        Route::new(self.slug.as_deref(), self.category.as_deref())
    }

    /// Config file (or defaults) with command line overrides applied.
    pub fn load_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(dir) = &self.content_dir {
            config.source.r#type = SourceType::File;
            config.source.content_dir = Some(dir.clone());
        }

        if let Some(endpoint) = &self.endpoint {
            config.source.r#type = SourceType::Graphql;
            config.source.endpoint = Some(endpoint.clone());
        }

        Ok(config)
    }
}
