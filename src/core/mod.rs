pub mod catalog;
pub mod classifier;
pub mod dispatcher;
pub mod metadata;
pub mod pipeline;

pub use crate::domain::model::{ContentEntity, QueryDescriptor, Route, RouteDecision};
pub use crate::domain::ports::{ConfigProvider, ContentFetcher};
pub use crate::utils::error::Result;
