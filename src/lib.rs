pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileFetcher, GraphqlFetcher, SourceFetcher};
pub use config::TomlConfig;
pub use crate::core::{
    classifier::classify,
    dispatcher::RenderInstruction,
    metadata::MetadataBuilder,
    pipeline::{FetchState, PageRenderer, PageView, RenderOutcome},
};
pub use domain::model::{Route, RouteDecision, TemplateFamily};
pub use utils::error::{PageError, Result};
