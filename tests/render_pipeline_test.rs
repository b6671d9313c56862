use httpmock::prelude::*;
use microsite_pages::core::dispatcher::{Block, ColumnWidth, SectionKind, Widget};
use microsite_pages::domain::model::{HeadTagKind, QueryKind};
use microsite_pages::{
    FileFetcher, GraphqlFetcher, MetadataBuilder, PageRenderer, Route, TemplateFamily, TomlConfig,
};
use std::time::Duration;
use tempfile::TempDir;

fn graphql_renderer(server: &MockServer) -> PageRenderer<GraphqlFetcher> {
    let fetcher = GraphqlFetcher::new(server.url("/graphql"), None, Duration::from_secs(5)).unwrap();
    PageRenderer::new(fetcher, MetadataBuilder::default())
}

fn main_column(blocks: &[Block]) -> &[Block] {
    blocks
        .iter()
        .find_map(|b| match b {
            Block::Column { blocks, .. } => Some(blocks.as_slice()),
            _ => None,
        })
        .expect("main column")
}

#[tokio::test]
async fn test_news_list_page_renders_narrow_body() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("pageCollection")
            .json_body_partial(r#"{ "variables": { "slug": "news" } }"#);
        then.status(200).json_body(serde_json::json!({
            "data": { "collection": { "items": [{
                "title": "News",
                "lead": "What is happening",
                "body": "All the latest.",
                "slug": "news",
                "showNews": true,
                "showSponsors": true,
                "config": { "scripts": ["https://cdn.example.com/widget.js"], "styles": ["https://cdn.example.com/widget.css"] },
                "leadCtasCollection": { "items": [{ "ctaText": "Subscribe", "slug": "newsletter" }] }
            }] } }
        }));
    });

    let view = graphql_renderer(&server)
        .render(Route::page("news"))
        .await
        .into_view()
        .unwrap();

    api_mock.assert();
    assert_eq!(view.decision.template, TemplateFamily::List);
    assert_eq!(view.decision.query, QueryKind::Page);
    assert!(!view.decision.wide_content);
    assert_eq!(view.instruction.kind, SectionKind::List);

    let main = main_column(&view.instruction.blocks);
    assert!(matches!(&main[0], Block::Markdown(m) if m.width == ColumnWidth::Narrow));
    assert_eq!(
        view.instruction.widgets(),
        vec![&Widget::NewsList, &Widget::Sponsors { detailed: false }]
    );

    let metadata = view.metadata.unwrap();
    assert_eq!(metadata.title, "News");
    assert_eq!(metadata.document_title, "News – Front Conference Zurich");
    assert_eq!(metadata.head_tags[0].kind, HeadTagKind::Script);
    assert_eq!(metadata.head_tags[1].kind, HeadTagKind::Style);
    assert_eq!(metadata.ctas.unwrap()[0].text, "Subscribe");
}

#[tokio::test]
async fn test_speaker_detail_end_to_end() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("speakerCollection")
            .body_contains("lead: description")
            .body_contains("body: bio");
        then.status(200).json_body(serde_json::json!({
            "data": { "collection": { "items": [{
                "title": "Jane Doe",
                "lead": "Design Engineer",
                "body": "Jane *builds* things.",
                "name": "Jane Doe",
                "description": "Design Engineer",
                "slug": "jane-doe",
                "photo": { "url": "https://images.example.com/jane.jpg" },
                "twitter": "jane",
                "website": "https://jane.dev"
            }] } }
        }));
    });

    let view = graphql_renderer(&server)
        .render(Route::in_category("jane-doe", "speakers"))
        .await
        .into_view()
        .unwrap();

    assert_eq!(view.decision.query, QueryKind::Speaker);
    assert!(view.decision.is_speaker_detail);

    let metadata = view.metadata.as_ref().unwrap();
    assert_eq!(metadata.title, "Speakers");
    assert_eq!(metadata.subtitle.as_deref(), Some("Jane Doe"));

    let blocks = &view.instruction.blocks;
    assert!(matches!(&blocks[1], Block::Backlink { link: Some(l) } if l.text == "Speakers" && l.target.path == "/speakers"));
    match &blocks[2] {
        Block::SpeakerColumns { profile, about } => {
            assert!(matches!(&profile[0], Block::Title { text, subtitle } if text == "Jane Doe" && subtitle.as_deref() == Some("Design Engineer")));
            assert!(matches!(&profile[1], Block::SpeakerImage { url: Some(u), .. } if u == "https://images.example.com/jane.jpg"));
            assert!(matches!(&about[1], Block::Markdown(m) if m.source == "Jane *builds* things."));
        }
        other => panic!("expected speaker columns, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upstream_failure_renders_error_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(503);
    });

    let view = graphql_renderer(&server)
        .render(Route::page("about"))
        .await
        .into_view()
        .unwrap();

    assert_eq!(view.instruction.kind, SectionKind::Error);
    assert!(matches!(&view.instruction.blocks[..], [Block::ErrorMessage { message }] if message == "Error loading pages."));
    assert!(view.metadata.is_none());
}

#[tokio::test]
async fn test_home_page_from_fixture_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("pageCollection.json"),
        serde_json::json!([{
            "title": "Front Conference",
            "slug": "/",
            "body": "Welcome!",
            "showNews": true,
            "showJobs": true,
            "showSponsors": false
        }])
        .to_string(),
    )
    .unwrap();

    let config = TomlConfig::from_toml_str(&format!(
        "[site]\nname = \"Fixture Conf\"\n\n[source]\ntype = \"file\"\ncontent_dir = \"{}\"\n",
        dir.path().display().to_string().replace('\\', "/")
    ))
    .unwrap();
    let renderer = PageRenderer::from_config(FileFetcher::new(config.content_dir()), &config);

    let view = renderer.render(Route::home()).await.into_view().unwrap();

    assert_eq!(view.instruction.kind, SectionKind::Default);
    assert_eq!(view.metadata.unwrap().document_title, "Fixture Conf");
    assert_eq!(
        view.instruction.widgets(),
        vec![
            &Widget::NewsSummary,
            &Widget::SpeakersList {
                limit: Some(6),
                with_heading: true
            },
            &Widget::Jobs,
        ]
    );
    assert!(!view.instruction.blocks.iter().any(|b| matches!(b, Block::Band { .. })));
}

#[tokio::test]
async fn test_shipped_config_and_fixtures() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = TomlConfig::from_file(root.join("microsite.toml")).unwrap();
    let renderer = PageRenderer::from_config(FileFetcher::new(root.join("content")), &config);

    let speaker = renderer
        .render(Route::in_category("jane-doe", "speakers"))
        .await
        .into_view()
        .unwrap();
    assert_eq!(speaker.metadata.unwrap().subtitle.as_deref(), Some("Jane Doe"));

    let news = renderer
        .render(Route::in_category("call-for-speakers", "news"))
        .await
        .into_view()
        .unwrap();
    assert_eq!(news.instruction.kind, SectionKind::Detail);

    let venue = renderer.render(Route::page("venue")).await.into_view().unwrap();
    assert!(venue.decision.wide_content);
    assert_eq!(
        venue.instruction.widgets(),
        vec![
            &Widget::VenueTeaser { is_venue: true },
            &Widget::HotelsList,
            &Widget::RestaurantsList,
        ]
    );

    let missing = renderer.render(Route::page("workshops")).await.into_view().unwrap();
    assert_eq!(missing.instruction.kind, SectionKind::NotFound);
}

#[tokio::test]
async fn test_malformed_optional_fields_still_render() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("pageCollection.json"),
        serde_json::json!([
            { "title": "About", "slug": "about", "config": { "scripts": "https://cdn.example.com/a.js" } },
            {
                "title": "Home",
                "slug": "/",
                "leadCtasCollection": { "items": [null, { "ctaText": "Tickets", "slug": "tickets" }] }
            }
        ])
        .to_string(),
    )
    .unwrap();
    let renderer = PageRenderer::new(FileFetcher::new(dir.path()), MetadataBuilder::default());

    let about = renderer.render(Route::page("about")).await.into_view().unwrap();
    assert_eq!(about.instruction.kind, SectionKind::List);
    assert!(about.metadata.unwrap().head_tags.is_empty());

    let home = renderer.render(Route::home()).await.into_view().unwrap();
    assert_eq!(home.instruction.kind, SectionKind::Default);
    let ctas = home.metadata.unwrap().ctas.unwrap();
    assert_eq!(ctas.len(), 1);
    assert_eq!(ctas[0].text, "Tickets");
}
