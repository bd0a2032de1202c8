use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use wiki_word_freq::cache::{CacheStore, DEFAULT_MAX_AGE};
use wiki_word_freq::pipeline::{AnalysisError, Status};
use wiki_word_freq::wiki::{CategoryEnumerator, LiveWikiClient, WikiClient, WikiConfig, WikiError};
use wiki_word_freq::{AnalyzerConfig, Analyzer};

const API_PATH: &str = "/w/api.php";

fn live_client(server: &ServerGuard) -> LiveWikiClient {
    let config = WikiConfig {
        timeout: Duration::from_secs(5),
        ..WikiConfig::new(format!("{}{}", server.url(), API_PATH))
    };
    LiveWikiClient::new(&config).unwrap()
}

fn members_query(category: &str) -> Vec<Matcher> {
    vec![
        Matcher::UrlEncoded("action".into(), "query".into()),
        Matcher::UrlEncoded("format".into(), "json".into()),
        Matcher::UrlEncoded("list".into(), "categorymembers".into()),
        Matcher::UrlEncoded("cmtitle".into(), format!("Category:{category}")),
        Matcher::UrlEncoded("cmlimit".into(), "500".into()),
    ]
}

async fn mock_members(
    server: &mut ServerGuard,
    category: &str,
    continuation: Option<&str>,
    body: serde_json::Value,
) -> Mock {
    let mut query = members_query(category);
    if let Some(token) = continuation {
        query.push(Matcher::UrlEncoded("cmcontinue".into(), token.into()));
    }

    server
        .mock("GET", API_PATH)
        .match_query(Matcher::AllOf(query))
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await
}

async fn mock_extract(server: &mut ServerGuard, title: &str, page: serde_json::Value) -> Mock {
    server
        .mock("GET", API_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("prop".into(), "extracts".into()),
            Matcher::UrlEncoded("explaintext".into(), "1".into()),
            Matcher::UrlEncoded("titles".into(), title.into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(json!({"batchcomplete": "", "query": {"pages": {"101": page}}}).to_string())
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn test_category_members_paginates_and_filters() {
    let mut server = Server::new_async().await;
    let first = mock_members(
        &mut server,
        "Felines",
        None,
        json!({
            "continue": {"cmcontinue": "page|LION|42", "continue": "-||"},
            "query": {"categorymembers": [
                {"pageid": 1, "ns": 0, "title": "Cat"},
                {"pageid": 2, "ns": 14, "title": "Category:Big cats"},
                {"pageid": 3, "ns": 1, "title": "Talk:Cat"}
            ]}
        }),
    )
    .await;
    let second = mock_members(
        &mut server,
        "Felines",
        Some("page|LION|42"),
        json!({
            "batchcomplete": "",
            "query": {"categorymembers": [
                {"pageid": 4, "ns": 0, "title": "Lion"},
                {"pageid": 5, "ns": 6, "title": "File:Lion.jpg"},
                {"pageid": 6, "ns": 0, "title": "Ocelot"}
            ]}
        }),
    )
    .await;

    let temp_dir = TempDir::new().unwrap();
    let cache = CacheStore::open(temp_dir.path(), DEFAULT_MAX_AGE).await.unwrap();
    let enumerator = CategoryEnumerator::new(Arc::new(live_client(&server)), cache, 500);

    let pages = enumerator.enumerate("Felines").await.unwrap();

    assert_eq!(pages, vec!["Cat", "Lion", "Ocelot"]);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_category_error_yields_no_pages() {
    let mut server = Server::new_async().await;
    let mock = mock_members(
        &mut server,
        "Bad|Name",
        None,
        json!({"error": {"code": "invalidcategory", "info": "The category name you entered is not valid."}}),
    )
    .await;

    let client = live_client(&server);
    let err = client
        .category_members("Bad|Name", 500, None)
        .await
        .unwrap_err();
    assert!(matches!(err, WikiError::Api { ref code, .. } if code == "invalidcategory"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_page_extract_text_and_missing() {
    let mut server = Server::new_async().await;
    let present = mock_extract(
        &mut server,
        "Cat",
        json!({"pageid": 101, "ns": 0, "title": "Cat", "extract": "The cat is a small carnivorous mammal."}),
    )
    .await;
    let missing = mock_extract(
        &mut server,
        "Cat (disambiguation)",
        json!({"pageid": 102, "ns": 0, "title": "Cat (disambiguation)"}),
    )
    .await;

    let client = live_client(&server);

    assert_eq!(
        client.page_extract("Cat").await.unwrap(),
        "The cat is a small carnivorous mammal."
    );
    assert_eq!(client.page_extract("Cat (disambiguation)").await.unwrap(), "");
    present.assert_async().await;
    missing.assert_async().await;
}

#[tokio::test]
async fn test_sends_user_agent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .match_header("user-agent", Matcher::Regex("^wiki-word-freq/".into()))
        .with_body(json!({"query": {"pages": {}}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = live_client(&server);

    assert_eq!(client.page_extract("Anything").await.unwrap(), "");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = live_client(&server);

    assert!(matches!(
        client.page_extract("Cat").await,
        Err(WikiError::Request(_))
    ));
}

async fn live_analyzer(server: &ServerGuard, temp_dir: &TempDir) -> Analyzer {
    let config = AnalyzerConfig {
        cache_dir: temp_dir.path().join("cache"),
        concurrency: 2,
        ..AnalyzerConfig::default()
    };
    let cache = CacheStore::open(&config.cache_dir, config.cache_max_age)
        .await
        .unwrap();
    Analyzer::new(Arc::new(live_client(server)), cache, &config)
}

#[tokio::test]
async fn test_analyze_end_to_end_then_from_cache() {
    let mut server = Server::new_async().await;
    let members = mock_members(
        &mut server,
        "Felines",
        None,
        json!({"query": {"categorymembers": [
            {"ns": 0, "title": "Cat"},
            {"ns": 0, "title": "Lion"}
        ]}}),
    )
    .await;
    let cat = mock_extract(
        &mut server,
        "Cat",
        json!({"title": "Cat", "extract": "Cats purr. A cat sleeps."}),
    )
    .await;
    let lion = mock_extract(
        &mut server,
        "Lion",
        json!({"title": "Lion", "extract": "Lions roar, unlike a cat."}),
    )
    .await;

    let temp_dir = TempDir::new().unwrap();
    let analyzer = live_analyzer(&server, &temp_dir).await;

    let first = analyzer.analyze("Felines").await.unwrap();
    let second = analyzer.analyze("Felines").await.unwrap();

    assert_eq!(first.status, Status::Success);
    assert_eq!(first, second);
    let words: Vec<(&str, u64)> = first
        .words
        .iter()
        .map(|c| (c.word.as_str(), c.frequency))
        .collect();
    assert_eq!(
        words,
        vec![
            ("cat", 2),
            ("cats", 1),
            ("purr", 1),
            ("sleeps", 1),
            ("lions", 1),
            ("roar", 1),
            ("unlike", 1)
        ]
    );

    members.assert_async().await;
    cat.assert_async().await;
    lion.assert_async().await;

    let cached = std::fs::read_dir(temp_dir.path().join("cache")).unwrap().count();
    assert_eq!(cached, 2);
}

#[tokio::test]
async fn test_analyze_unknown_category() {
    let mut server = Server::new_async().await;
    let _members = mock_members(
        &mut server,
        "Nothing here",
        None,
        json!({"batchcomplete": "", "query": {"categorymembers": []}}),
    )
    .await;

    let temp_dir = TempDir::new().unwrap();
    let analyzer = live_analyzer(&server, &temp_dir).await;

    let report = analyzer.analyze("Nothing here").await.unwrap();

    assert_eq!(report.status, Status::Error);
    assert!(report.words.is_empty());
    assert!(report.message.contains("'Nothing here'"));
}

#[tokio::test]
async fn test_analyze_transport_failure() {
    let mut server = Server::new_async().await;
    let _members = mock_members(
        &mut server,
        "Felines",
        None,
        json!({"query": {"categorymembers": [{"ns": 0, "title": "Cat"}]}}),
    )
    .await;
    let _extract = server
        .mock("GET", API_PATH)
        .match_query(Matcher::UrlEncoded("prop".into(), "extracts".into()))
        .with_status(500)
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let analyzer = live_analyzer(&server, &temp_dir).await;

    let result = analyzer.analyze("Felines").await;

    assert!(matches!(result, Err(AnalysisError::Fetch(_))));
}
