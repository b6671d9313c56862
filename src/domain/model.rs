use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The (slug, category) pair an external router hands to the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub slug: String,
    pub category: Option<String>,
}

impl Route {
    pub const HOME_SLUG: &'static str = "/";

    /// Blank slugs resolve to the home page, blank categories to none.
    pub fn new(slug: Option<&str>, category: Option<&str>) -> Self {
        let slug = match slug.map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => Self::HOME_SLUG.to_string(),
        };
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Self { slug, category }
    }

    pub fn home() -> Self {
        Self::new(None, None)
    }

    pub fn page(slug: &str) -> Self {
        Self::new(Some(slug), None)
    }

    pub fn in_category(slug: &str, category: &str) -> Self {
        Self::new(Some(slug), Some(category))
    }

    pub fn is_home(&self) -> bool {
        self.slug == Self::HOME_SLUG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFamily {
    List,
    Detail,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    Page,
    NewsItem,
    Speaker,
}

/// One entry of a query's field selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Field(&'static str),
    /// Requested under `source`, delivered under the canonical name.
    Alias {
        canonical: &'static str,
        source: &'static str,
    },
    /// A field with its own selection set, written verbatim.
    Nested {
        name: &'static str,
        selection: &'static str,
    },
}

/// Which collection to query and how its fields map onto the canonical entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub kind: QueryKind,
    pub collection: &'static str,
    pub selections: &'static [Selection],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTarget {
    pub slug: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackLink {
    pub text: String,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    pub template: TemplateFamily,
    pub query: QueryKind,
    pub wide_content: bool,
    pub is_home: bool,
    pub is_venue: bool,
    pub is_speaker_detail: bool,
    pub back_link: Option<BackLink>,
}

/// GraphQL collections wrap their entries as `{ items: [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Collection<T> {
    /// Null entries (unpublished links) and malformed ones are skipped.
    #[serde(default = "Vec::new", deserialize_with = "lenient_items")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisibilityFlags {
    #[serde(deserialize_with = "null_as_default")]
    pub show_intro: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_news: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_speakers: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_venue: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_sponsorship_categories: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_sponsors: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_sponsors_detailed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_workshops: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_team: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_jobs: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_jobs_detailed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_schedule: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_hotels: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_restaurants: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    #[serde(deserialize_with = "lenient_items")]
    pub scripts: Vec<String>,
    #[serde(deserialize_with = "lenient_items")]
    pub styles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cta {
    #[serde(rename = "ctaText", default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// A fetched record in canonical shape. Speaker and news entries land here
/// after their fields were projected onto `title`/`lead`/`body`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentEntity {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub lead: Option<String>,
    pub body: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(flatten)]
    pub flags: VisibilityFlags,
    #[serde(deserialize_with = "lenient")]
    pub config: Option<PageConfig>,
    #[serde(deserialize_with = "lenient")]
    pub lead_ctas_collection: Option<Collection<Cta>>,

    // news
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub tags_collection: Option<Collection<Tag>>,

    // speaker
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub photo: Option<Asset>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,

    /// Presentation fields (menu, bodyClass, ctaText, ...) the core passes through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    Twitter,
    Linkedin,
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub url: String,
    pub icon: SocialIcon,
    pub label: String,
}

impl ContentEntity {
    /// Non-blank markdown body, if any.
    pub fn body_markdown(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.trim().is_empty())
    }

    pub fn ctas(&self) -> Option<&[Cta]> {
        self.lead_ctas_collection.as_ref().map(|c| c.items.as_slice())
    }

    pub fn tags(&self) -> Vec<&str> {
        self.tags_collection
            .as_ref()
            .map(|c| c.items.iter().map(|t| t.title.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo.as_ref().map(|p| p.url.as_str())
    }

    pub fn social_links(&self) -> Vec<SocialLink> {
        let mut links = Vec::new();

        if let Some(handle) = non_blank(&self.twitter) {
            links.push(SocialLink {
                url: format!("https://twitter.com/{}", handle),
                icon: SocialIcon::Twitter,
                label: format!("{} Twitter profile", self.title),
            });
        }

        if let Some(handle) = non_blank(&self.linkedin) {
            links.push(SocialLink {
                url: format!("https://linkedin.com/{}", handle),
                icon: SocialIcon::Linkedin,
                label: format!("{} Linkedin profile", self.title),
            });
        }

        if let Some(site) = non_blank(&self.website) {
            links.push(SocialLink {
                url: site.to_string(),
                icon: SocialIcon::Website,
                label: format!("{} Website", self.title),
            });
        }

        links
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadTagKind {
    Script,
    Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadTag {
    pub kind: HeadTagKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub subtitle: Option<String>,
    pub document_title: String,
    pub head_tags: Vec<HeadTag>,
    pub ctas: Option<Vec<Cta>>,
}

// CMS fields come back as explicit nulls when unset.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Free-form CMS fields: a wrong shape degrades to the default instead of
// failing the whole entry.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_items<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
