//! Route classifier.
//!
//! Two lookup stages composed by [`merge`]: the slug picks the root template
//! and layout flags, then a known category replaces the template and query.

use crate::domain::model::{BackLink, LinkTarget, QueryKind, Route, RouteDecision, TemplateFamily};

/// List pages whose body spans the full content width.
pub const WIDE_LIST_SLUGS: &[&str] = &["venue", "sponsors"];

// privacy-policy is not listed: it renders with the default template.
pub const LIST_SLUGS: &[&str] = &[
    "venue",
    "sponsors",
    "terms",
    "jobs",
    "code-of-conduct",
    "news",
    "about",
    "sponsorship",
];

pub const VENUE_SLUG: &str = "venue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RootDecision {
    template: TemplateFamily,
    wide_content: bool,
    is_home: bool,
    is_venue: bool,
}

#[derive(Debug)]
struct CategoryOverride {
    category: &'static str,
    query: QueryKind,
    speaker_detail: bool,
    back_text: &'static str,
    listing_slug: &'static str,
}

static CATEGORY_OVERRIDES: &[CategoryOverride] = &[
    CategoryOverride {
        category: "speakers",
        query: QueryKind::Speaker,
        speaker_detail: true,
        back_text: "Speakers",
        listing_slug: "speakers",
    },
    CategoryOverride {
        category: "news",
        query: QueryKind::NewsItem,
        speaker_detail: false,
        back_text: "News",
        listing_slug: "news",
    },
];

fn root_decision(slug: &str) -> RootDecision {
    let template = if LIST_SLUGS.contains(&slug) {
        TemplateFamily::List
    } else {
        TemplateFamily::Default
    };

    RootDecision {
        template,
        wide_content: WIDE_LIST_SLUGS.contains(&slug),
        is_home: slug == Route::HOME_SLUG,
        is_venue: slug == VENUE_SLUG,
    }
}

// Unknown categories (hosts, workshops, ...) have no override.
fn category_override(category: Option<&str>) -> Option<&'static CategoryOverride> {
    let category = category?;
    CATEGORY_OVERRIDES.iter().find(|o| o.category == category)
}

fn merge(root: RootDecision, category: Option<&CategoryOverride>) -> RouteDecision {
    let mut decision = RouteDecision {
        template: root.template,
        query: QueryKind::Page,
        wide_content: root.wide_content,
        is_home: root.is_home,
        is_venue: root.is_venue,
        is_speaker_detail: false,
        back_link: None,
    };

    if let Some(o) = category {
        decision.template = TemplateFamily::Detail;
        decision.query = o.query;
        decision.is_speaker_detail = o.speaker_detail;
        decision.back_link = Some(BackLink {
            text: o.back_text.to_string(),
            target: LinkTarget {
                slug: o.listing_slug.to_string(),
                path: format!("/{}", o.listing_slug),
            },
        });
    }

    decision
}

/// Total and pure: every route yields exactly one decision.
pub fn classify(route: &Route) -> RouteDecision {
    merge(
        root_decision(&route.slug),
        category_override(route.category.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_slugs_without_category() {
        for slug in LIST_SLUGS {
            let decision = classify(&Route::page(slug));
            assert_eq!(decision.template, TemplateFamily::List, "slug {}", slug);
            assert_eq!(decision.query, QueryKind::Page);
            assert_eq!(decision.wide_content, WIDE_LIST_SLUGS.contains(slug), "slug {}", slug);
            assert!(decision.back_link.is_none());
        }
    }

    #[test]
    fn test_privacy_policy_uses_default_template() {
        let decision = classify(&Route::page("privacy-policy"));
        assert_eq!(decision.template, TemplateFamily::Default);
        assert!(!decision.wide_content);
    }

    #[test]
    fn test_wide_slugs() {
        assert!(classify(&Route::page("venue")).wide_content);
        assert!(classify(&Route::page("sponsors")).wide_content);
        assert!(!classify(&Route::page("news")).wide_content);
    }

    #[test]
    fn test_home_route() {
        let decision = classify(&Route::home());
        assert!(decision.is_home);
        assert!(!decision.is_venue);
        assert_eq!(decision.template, TemplateFamily::Default);
        assert_eq!(decision.query, QueryKind::Page);
    }

    #[test]
    fn test_unknown_slug_falls_back_to_default() {
        let decision = classify(&Route::page("workshop-day"));
        assert_eq!(decision.template, TemplateFamily::Default);
        assert_eq!(decision.query, QueryKind::Page);
        assert!(!decision.wide_content && !decision.is_home && !decision.is_speaker_detail);
    }

    #[test]
    fn test_speakers_category_overrides_any_slug() {
        for slug in ["jane-doe", "venue", "/", "news"] {
            let decision = classify(&Route::in_category(slug, "speakers"));
            assert_eq!(decision.template, TemplateFamily::Detail);
            assert_eq!(decision.query, QueryKind::Speaker);
            assert!(decision.is_speaker_detail);

            let back = decision.back_link.unwrap();
            assert_eq!(back.text, "Speakers");
            assert_eq!(back.target.slug, "speakers");
            assert_eq!(back.target.path, "/speakers");
        }
    }

    #[test]
    fn test_news_category() {
        let decision = classify(&Route::in_category("launch-day", "news"));
        assert_eq!(decision.template, TemplateFamily::Detail);
        assert_eq!(decision.query, QueryKind::NewsItem);
        assert!(!decision.is_speaker_detail);
        assert_eq!(decision.back_link.unwrap().text, "News");
    }

    #[test]
    fn test_root_flags_survive_category_override() {
        let decision = classify(&Route::in_category("venue", "news"));
        assert_eq!(decision.template, TemplateFamily::Detail);
        assert!(decision.wide_content);
        assert!(decision.is_venue);
    }

    #[test]
    fn test_unknown_category_uses_page_query() {
        for category in ["hosts", "workshops"] {
            let decision = classify(&Route::in_category("about", category));
            assert_eq!(decision.template, TemplateFamily::List);
            assert_eq!(decision.query, QueryKind::Page);
            assert!(decision.back_link.is_none());
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        let route = Route::in_category("jane-doe", "speakers");
        assert_eq!(classify(&route), classify(&route));
    }
}
