use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use stargazer_core::RemoteQuery;
use stargazer_engine::{FailureKind, RepoSearch, ReqwestSearch, SearchSettings};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> SearchSettings {
    SearchSettings {
        api_base: server.uri(),
        ..SearchSettings::default()
    }
}

fn query(page: u32, page_size: u32, language: &str) -> RemoteQuery {
    RemoteQuery {
        page,
        page_size,
        language: language.to_string(),
    }
}

fn item(id: u64, stars: u64, language: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "node_id": "ignored",
        "full_name": format!("owner/repo-{id}"),
        "html_url": format!("https://github.com/owner/repo-{id}"),
        "description": null,
        "language": language,
        "stargazers_count": stars,
        "forks_count": 3
    })
}

#[tokio::test]
async fn search_sends_query_and_keeps_service_order() {
    stargazer_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "stars:>1 language:Rust"))
        .and(query_param("sort", "stars"))
        .and(query_param("order", "desc"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 7,
            "incomplete_results": false,
            "items": [item(1, 10, Some("Rust")), item(2, 90, Some("Rust")), item(3, 50, None)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let search = ReqwestSearch::new(settings(&server)).unwrap();
    let page = search.search(&query(2, 3, "Rust")).await.expect("search ok");

    assert_eq!(page.page, 2);
    assert_eq!(page.page_size, 3);
    assert_eq!(page.total_count, 7);
    assert!(page.has_more);
    let ids: Vec<u64> = page.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(page.items[2].language, None);
    assert_eq!(page.items[0].description, None);
}

#[tokio::test]
async fn multi_word_language_is_sent_as_one_qualifier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "stars:>1 language:\"Jupyter Notebook\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "items": [item(8, 40, Some("Jupyter Notebook"))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let search = ReqwestSearch::new(settings(&server)).unwrap();
    let page = search
        .search(&query(1, 30, "Jupyter Notebook"))
        .await
        .expect("search ok");
    assert_eq!(page.items[0].language.as_deref(), Some("Jupyter Notebook"));
}

#[tokio::test]
async fn last_page_reports_no_more() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "stars:>1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 6,
            "items": [item(5, 2, None), item(6, 2, None)]
        })))
        .mount(&server)
        .await;

    let search = ReqwestSearch::new(settings(&server)).unwrap();
    let page = search.search(&query(3, 2, "")).await.unwrap();
    assert!(!page.has_more);
}

#[tokio::test]
async fn missing_fields_default_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let search = ReqwestSearch::new(settings(&server)).unwrap();
    let page = search.search(&query(1, 30, "")).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
    assert!(!page.has_more);
}

#[tokio::test]
async fn error_message_comes_from_service_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for 127.0.0.1.",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&server)
        .await;

    let search = ReqwestSearch::new(settings(&server)).unwrap();
    let err = search.search(&query(1, 30, "")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(403));
    assert_eq!(err.message, "API rate limit exceeded for 127.0.0.1.");
}

#[tokio::test]
async fn error_message_falls_back_to_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&server)
        .await;

    let search = ReqwestSearch::new(settings(&server)).unwrap();
    let err = search.search(&query(1, 30, "")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message, "503 Service Unavailable");
    assert_eq!(err.to_string(), "503 Service Unavailable");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let search = ReqwestSearch::new(settings(&server)).unwrap();
    let err = search.search(&query(1, 30, "")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "total_count": 0, "items": [] })),
        )
        .mount(&server)
        .await;

    let search = ReqwestSearch::new(SearchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings(&server)
    })
    .unwrap();
    let err = search.search(&query(1, 30, "")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let search = ReqwestSearch::new(SearchSettings {
        max_bytes: 16,
        ..settings(&server)
    })
    .unwrap();
    let err = search.search(&query(1, 30, "")).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 16,
            actual: Some(64)
        }
    );
}
