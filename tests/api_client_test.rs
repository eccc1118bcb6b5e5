//! Integration tests for the REST client against wiremock endpoints:
//! - request paths and bodies for each joke operation
//! - envelope decoding, including `null` lists
//! - status code to `ServiceError` mapping

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hahasaas_cli::api::ApiClient;
use hahasaas_cli::dispatch::Interpreter;
use hahasaas_cli::service::{Joke, JokeService, ServiceError};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&format!("{}/api", server.uri()), Duration::from_secs(5)).expect("client build")
}

fn joke_body() -> serde_json::Value {
    json!({ "joke": { "id": 7, "content": "I told a UDP joke", "likes": 2, "dislikes": 0 } })
}

#[tokio::test]
async fn random_joke_by_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/joke/random/dad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(joke_body()))
        .expect(1)
        .mount(&server)
        .await;

    let joke = client(&server).random_joke(Some("dad")).await.expect("joke");
    assert_eq!(
        joke,
        Joke {
            id: 7,
            content: "I told a UDP joke".to_string(),
            likes: 2,
            dislikes: 0,
        }
    );
}

#[tokio::test]
async fn category_with_spaces_stays_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/joke/category/knock%20knock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jokes": ["who's there"] })))
        .expect(1)
        .mount(&server)
        .await;

    let jokes = client(&server).list_jokes(Some("knock knock")).await.expect("jokes");
    assert_eq!(jokes, vec!["who's there"]);
}

#[tokio::test]
async fn null_lists_decode_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/joke/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "categories": null })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/joke/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jokes": null })))
        .mount(&server)
        .await;

    let api = client(&server);
    assert!(api.list_categories().await.expect("categories").is_empty());
    assert!(api.list_jokes(None).await.expect("jokes").is_empty());
}

#[tokio::test]
async fn create_joke_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/joke"))
        .and(body_json(json!({ "category": "code", "joke": "hello world" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Joke added successfully" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).create_joke("hello world", "code").await.expect("created");
}

#[tokio::test]
async fn reactions_and_attach_hit_their_routes() {
    let server = MockServer::start().await;
    for route in ["/api/joke/like/3", "/api/joke/dislike/3", "/api/joke/category/code/3"] {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    let api = client(&server);
    api.like_joke("3").await.expect("liked");
    api.dislike_joke("3").await.expect("disliked");
    api.attach_joke("3", "code").await.expect("attached");
}

#[tokio::test]
async fn backend_error_message_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/joke/category"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "error adding category: duplicate key" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).create_category("dad").await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::Status {
            status: 500,
            message: "error adding category: duplicate key".to_string(),
        }
    );
}

#[tokio::test]
async fn status_codes_map_to_variants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/joke/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/joke"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
        .mount(&server)
        .await;

    let api = client(&server);
    assert_eq!(
        api.joke_by_id("404").await.unwrap_err(),
        ServiceError::NotFound("Failed to fetch joke".to_string())
    );
    assert_eq!(
        api.create_joke("x", "y").await.unwrap_err(),
        ServiceError::Rejected("Failed to add joke".to_string())
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/joke/random"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).random_joke(None).await.unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/joke/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "categories": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new(&format!("{}/api", server.uri()), Duration::from_millis(200)).expect("client");
    let err = api.list_categories().await.unwrap_err();
    assert!(matches!(err, ServiceError::Timeout(_)));
}

#[tokio::test]
async fn interpreter_reports_http_failure_and_continues() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/joke/like/1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/joke/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "categories": ["dad"] })))
        .mount(&server)
        .await;

    let mut interp = Interpreter::new(client(&server));
    interp.submit("good --id 1").await;
    assert_eq!(
        interp.log().last().map(|e| e.text.as_str()),
        Some("Error: Failed to like joke. Status: 503")
    );

    interp.submit("lsc").await;
    assert_eq!(
        interp.log().last().map(|e| e.text.as_str()),
        Some("Available Categories:\ndad")
    );

    interp.submit("rndj -c .").await;
    assert_eq!(
        interp.log().last().map(|e| e.text.as_str()),
        Some(r#"Error: invalid path segment ".""#)
    );
}

#[tokio::test]
async fn dot_segments_are_refused_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(joke_body()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = client(&server);
    assert_eq!(
        api.random_joke(Some(".")).await.unwrap_err(),
        ServiceError::Rejected(r#"invalid path segment ".""#.to_string())
    );
    assert!(matches!(api.list_jokes(Some("..")).await, Err(ServiceError::Rejected(_))));
    assert!(matches!(api.like_joke(".").await, Err(ServiceError::Rejected(_))));
    assert!(matches!(api.attach_joke("1", "..").await, Err(ServiceError::Rejected(_))));

    let requests = server.received_requests().await.expect("request recording on");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn dotted_names_are_still_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/joke/random/.net"))
        .respond_with(ResponseTemplate::new(200).set_body_json(joke_body()))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).random_joke(Some(".net")).await.expect("joke");
}

#[test]
fn rejects_unusable_base_url() {
    assert!(ApiClient::new("not a url", Duration::from_secs(1)).is_err());
    assert!(ApiClient::new("mailto:jokes@example.com", Duration::from_secs(1)).is_err());
}
