use crate::domain::model::{ContentEntity, HeadTag, HeadTagKind, PageMetadata, Route, RouteDecision};

pub const DEFAULT_SITE_NAME: &str = "Front Conference Zurich";

#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    site_name: String,
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_NAME)
    }
}

impl MetadataBuilder {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn build(&self, entity: &ContentEntity, decision: &RouteDecision, route: &Route) -> PageMetadata {
        let (title, subtitle) = match route.category.as_deref() {
            Some(category) => (capitalize(category), Some(entity.title.clone())),
            None => (entity.title.clone(), None),
        };

        let document_title = if decision.is_home {
            self.site_name.clone()
        } else {
            format!("{} – {}", title, self.site_name)
        };

        PageMetadata {
            title,
            subtitle,
            document_title,
            head_tags: head_tags(entity),
            ctas: entity.ctas().map(<[_]>::to_vec),
        }
    }
}

/// Scripts first, then styles, each in declared order.
fn head_tags(entity: &ContentEntity) -> Vec<HeadTag> {
    let Some(config) = &entity.config else {
        return Vec::new();
    };

    let scripts = config.scripts.iter().map(|url| HeadTag {
        kind: HeadTagKind::Script,
        url: url.clone(),
    });
    let styles = config.styles.iter().map(|url| HeadTag {
        kind: HeadTagKind::Style,
        url: url.clone(),
    });

    scripts.chain(styles).collect()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
