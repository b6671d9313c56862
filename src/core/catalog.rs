//! Query catalog: one fixed descriptor per content shape.
//!
//! Speaker entries expose `name`/`description`/`bio`; the descriptor aliases
//! them onto `title`/`lead`/`body` so everything downstream sees one shape.

use crate::domain::model::{QueryDescriptor, QueryKind, Selection};
use serde_json::{Map, Value};
use std::fmt::Write;

use Selection::{Alias, Field, Nested};

static PAGE_QUERY: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::Page,
    collection: "pageCollection",
    selections: &[
        Field("title"),
        Field("lead"),
        Field("body"),
        Field("slug"),
        Field("menu"),
        Field("menuButton"),
        Field("showIntro"),
        Field("showNews"),
        Field("showSpeakers"),
        Field("showVenue"),
        Field("showSponsorshipCategories"),
        Field("showSponsors"),
        Field("showSponsorsDetailed"),
        Field("showWorkshops"),
        Field("showTeam"),
        Field("showJobs"),
        Field("showJobsDetailed"),
        Field("showSchedule"),
        Field("showHotels"),
        Field("showRestaurants"),
        Field("bodyClass"),
        Field("menuClass"),
        Field("ctaText"),
        Field("specialPage"),
        Field("config"),
        Nested {
            name: "leadCtasCollection",
            selection: "items { ctaText slug }",
        },
    ],
};

static NEWS_ITEM_QUERY: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::NewsItem,
    collection: "newsCollection",
    selections: &[
        Field("title"),
        Field("date"),
        Field("body"),
        Field("slug"),
        Nested {
            name: "tagsCollection",
            selection: "items { title }",
        },
    ],
};

static SPEAKER_QUERY: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::Speaker,
    collection: "speakerCollection",
    selections: &[
        Alias {
            canonical: "title",
            source: "name",
        },
        Alias {
            canonical: "lead",
            source: "description",
        },
        Alias {
            canonical: "body",
            source: "bio",
        },
        Field("name"),
        Field("description"),
        Field("slug"),
        Nested {
            name: "photo",
            selection: "url(transform: { width: 294, height: 395, resizeStrategy: FILL })",
        },
        Field("linkedin"),
        Field("twitter"),
        Field("website"),
    ],
};

pub fn descriptor(kind: QueryKind) -> &'static QueryDescriptor {
    match kind {
        QueryKind::Page => &PAGE_QUERY,
        QueryKind::NewsItem => &NEWS_ITEM_QUERY,
        QueryKind::Speaker => &SPEAKER_QUERY,
    }
}

impl QueryDescriptor {
    /// GraphQL document selecting entries of this collection by `$slug`.
    pub fn document(&self) -> String {
        let mut doc = String::new();
        doc.push_str("query($slug: String!) {\n");
        let _ = writeln!(doc, "  collection: {}(where: {{ slug: $slug }}) {{", self.collection);
        doc.push_str("    items {\n");
        for selection in self.selections {
            let line = match selection {
                Field(name) => name.to_string(),
                Alias { canonical, source } => format!("{}: {}", canonical, source),
                Nested { name, selection } => format!("{} {{ {} }}", name, selection),
            };
            let _ = writeln!(doc, "      {}", line);
        }
        doc.push_str("    }\n  }\n}\n");
        doc
    }

    /// (canonical, source) pairs declared by this descriptor.
    pub fn aliases(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.selections.iter().filter_map(|s| match s {
            Alias { canonical, source } => Some((*canonical, *source)),
            _ => None,
        })
    }

    /// Fill canonical fields from their source fields on a raw record.
    /// Canonical values already present are kept, so applying it to an
    /// already-aliased GraphQL response changes nothing.
    pub fn project(&self, mut raw: Map<String, Value>) -> Map<String, Value> {
        for (canonical, source) in self.aliases() {
            let missing = raw.get(canonical).map_or(true, Value::is_null);
            if missing {
                if let Some(value) = raw.get(source).cloned() {
                    raw.insert(canonical.to_string(), value);
                }
            }
        }
        raw
    }
}
