use httpmock::prelude::*;
use microsite_pages::core::catalog::descriptor;
use microsite_pages::domain::model::QueryKind;
use microsite_pages::domain::ports::ContentFetcher;
use microsite_pages::{GraphqlFetcher, PageError};
use std::time::Duration;

fn fetcher(server: &MockServer, token: Option<&str>) -> GraphqlFetcher {
    GraphqlFetcher::new(
        server.url("/graphql"),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_speaker_query_sends_aliases_and_slug() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .header("authorization", "Bearer secret")
            .body_contains("collection: speakerCollection(where: { slug: $slug })")
            .body_contains("title: name")
            .json_body_partial(r#"{ "variables": { "slug": "jane-doe" } }"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": { "collection": { "items": [{
                    "title": "Jane Doe",
                    "lead": "Engineer",
                    "body": "Builds things",
                    "name": "Jane Doe",
                    "description": "Engineer",
                    "slug": "jane-doe",
                    "photo": { "url": "https://images.example.com/jane.jpg" },
                    "linkedin": null,
                    "twitter": "jane",
                    "website": null
                }] } }
            }));
    });

    let entity = fetcher(&server, Some("secret"))
        .fetch(descriptor(QueryKind::Speaker), "jane-doe")
        .await
        .unwrap()
        .unwrap();

    api_mock.assert();
    assert_eq!(entity.title, "Jane Doe");
    assert_eq!(entity.lead.as_deref(), Some("Engineer"));
    assert_eq!(entity.body.as_deref(), Some("Builds things"));
    assert_eq!(entity.social_links().len(), 1);
}

#[tokio::test]
async fn test_empty_collection_is_not_found() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("pageCollection");
        then.status(200)
            .json_body(serde_json::json!({ "data": { "collection": { "items": [] } } }));
    });

    let result = fetcher(&server, None)
        .fetch(descriptor(QueryKind::Page), "missing")
        .await
        .unwrap();

    api_mock.assert();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_first_of_multiple_matches_wins() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(serde_json::json!({
            "data": { "collection": { "items": [
                { "title": "First", "slug": "launch" },
                { "title": "Second", "slug": "launch" }
            ] } }
        }));
    });

    let entity = fetcher(&server, None)
        .fetch(descriptor(QueryKind::NewsItem), "launch")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(entity.title, "First");
}

#[tokio::test]
async fn test_graphql_errors_become_query_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(serde_json::json!({
            "data": null,
            "errors": [{ "message": "Cannot query field \"showTeam\"" }]
        }));
    });

    let result = fetcher(&server, None).fetch(descriptor(QueryKind::Page), "about").await;

    match result {
        Err(PageError::QueryError { message }) => assert!(message.contains("showTeam")),
        other => panic!("expected query error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_failure_becomes_upstream_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(401).body("access token invalid");
    });

    let result = fetcher(&server, Some("wrong")).fetch(descriptor(QueryKind::Page), "about").await;

    api_mock.assert();
    match result {
        Err(PageError::UpstreamStatusError { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "access token invalid");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}
