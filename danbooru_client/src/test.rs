use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{build_client, Credential, DanbooruClient, Error};

type Seen = Arc<Mutex<Vec<String>>>;

/// Serve `app` on an ephemeral local port and return its base URL.
fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener).unwrap().serve(app.into_make_service());
    tokio::spawn(server);
    format!("http://{}", addr)
}

fn client(base_url: &str) -> DanbooruClient {
    let http = build_client(Duration::from_secs(5), "127.0.0.1:53".parse().unwrap()).unwrap();
    let credential = Credential {
        login: "alice".to_string(),
        api_key: "secret".to_string(),
    };
    DanbooruClient::new(http, base_url, credential).unwrap()
}

fn pairs(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

fn post_json(id: i64) -> Value {
    json!({
        "id": id,
        "created_at": "2024-01-05T10:21:44.553-05:00",
        "file_url": format!("https://cdn.example.org/{}.jpg", id),
        "tag_string": "cat dog blue_sky",
        "rating": "g",
        "score": 12,
        "md5": "ignored",
    })
}

async fn record(State(seen): State<Seen>, RawQuery(query): RawQuery) -> Json<Value> {
    seen.lock().unwrap().push(query.unwrap_or_default());
    Json(json!([post_json(1), post_json(2)]))
}

async fn record_tags(State(seen): State<Seen>, RawQuery(query): RawQuery) -> Json<Value> {
    seen.lock().unwrap().push(query.unwrap_or_default());
    Json(json!([{ "id": 5, "name": "blue_hair", "post_count": 1000, "category": 0, "is_deprecated": false }]))
}

fn recording_app(seen: Seen) -> Router {
    Router::new()
        .route("/posts.json", get(record))
        .route("/tags.json", get(record_tags))
        .with_state(seen)
}

#[tokio::test]
async fn test_posts_query_string() {
    let seen = Seen::default();
    let base_url = serve(recording_app(seen.clone()));

    let tags = vec!["rating:g".to_string(), "blue_sky".to_string()];
    let posts = client(&base_url).posts(&tags, 500, 7, true).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].tag_string, "cat dog blue_sky");

    let query = seen.lock().unwrap()[0].clone();
    assert!(query.contains("tags=rating%3Ag+blue_sky"), "{}", query);
    assert!(!query.contains("%25"), "escaped twice: {}", query);
    let params = pairs(&query);
    assert_eq!(params["tags"], "rating:g blue_sky");
    assert_eq!(params["limit"], "500");
    assert_eq!(params["page"], "7");
    assert_eq!(params["random"], "true");
    assert_eq!(params["login"], "alice");
    assert_eq!(params["api_key"], "secret");
}

#[tokio::test]
async fn test_posts_without_random_flag() {
    let seen = Seen::default();
    let base_url = serve(recording_app(seen.clone()));

    client(&base_url).posts(&[], 40, 1, false).await.unwrap();

    let params = pairs(&seen.lock().unwrap()[0]);
    assert!(!params.contains_key("random"));
    assert_eq!(params["tags"], "");
}

#[tokio::test]
async fn test_tags_query_string() {
    let seen = Seen::default();
    let base_url = serve(recording_app(seen.clone()));
    let client = client(&base_url);

    let names = vec!["cat".to_string(), "dog".to_string()];
    let tags = client.tags(&names, None, 200, 2, "").await.unwrap();
    assert_eq!(tags[0].name, "blue_hair");
    client.tags(&names, Some(4), 200, 2, "post_count").await.unwrap();

    let seen = seen.lock().unwrap();
    let first = pairs(&seen[0]);
    assert_eq!(first["search[name]"], "cat,dog");
    assert_eq!(first["limit"], "200");
    assert_eq!(first["page"], "2");
    assert_eq!(first["hide_empty"], "yes");
    assert!(!first.contains_key("order"));
    assert!(!first.contains_key("search[category]"));

    let second = pairs(&seen[1]);
    assert_eq!(second["order"], "post_count");
    assert_eq!(second["search[category]"], "4");
}

#[tokio::test]
async fn test_tag_matches_appends_wildcard() {
    let seen = Seen::default();
    let base_url = serve(recording_app(seen.clone()));

    client(&base_url).tag_matches("blue_h", None, 10, 1, "count").await.unwrap();

    let query = seen.lock().unwrap()[0].clone();
    let params = pairs(&query);
    assert_eq!(params["search[name_matches]"], "blue_h*");
    assert_eq!(params["hide_empty"], "yes");
    assert_eq!(params["order"], "count");
    assert!(!params.contains_key("search[name]"));
}

async fn single_post(Path(file): Path<String>) -> impl IntoResponse {
    match file.as_str() {
        "404.json" => (StatusCode::NOT_FOUND, Json(json!({ "success": false }))).into_response(),
        "500.json" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "13.json" => Json(json!({ "id": "thirteen" })).into_response(),
        _ => Json(post_json(7)).into_response(),
    }
}

#[tokio::test]
async fn test_post_status_mapping() {
    let app = Router::new().route("/posts/:file", get(single_post));
    let client = client(&serve(app));

    let post = client.post(7).await.unwrap();
    assert_eq!(post.id, 7);

    match client.post(404).await {
        Err(Error::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other),
    }
    match client.post(500).await {
        Err(Error::UpstreamError { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected UpstreamError, got {:?}", other),
    }
    match client.post(13).await {
        Err(Error::JSONPathError(e)) => assert_eq!(e.path().to_string(), "id"),
        other => panic!("expected JSONPathError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_not_found_is_upstream_error() {
    let app = Router::new().route(
        "/posts.json",
        get(|| async { (StatusCode::NOT_FOUND, "no such page") }),
    );
    let client = client(&serve(app));

    match client.posts(&[], 40, 1, false).await {
        Err(Error::UpstreamError { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such page");
        }
        other => panic!("expected UpstreamError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let app = Router::new().route("/tags.json", get(|| async { "[{\"id\": 1," }));
    let client = client(&serve(app));

    let result = client.tags(&[], None, 20, 1, "").await;
    assert!(matches!(result, Err(Error::JSONPathError(_))), "{:?}", result);
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    // Nothing listens on the discard port locally.
    let client = client("http://127.0.0.1:9");
    let result = client.posts(&[], 40, 1, false).await;
    assert!(matches!(result, Err(Error::NetworkError(_))), "{:?}", result);
}

#[tokio::test]
async fn test_network_error_does_not_leak_api_key() {
    let client = client("http://127.0.0.1:9");
    let err = client.artists("someone", 50, 1).await.unwrap_err();
    assert!(matches!(err, Error::NetworkError(_)));
    assert!(!err.to_string().contains("secret"), "{}", err);
    assert!(!format!("{:?}", err).contains("secret"), "{:?}", err);
}

#[tokio::test]
async fn test_request_timeout_is_network_error() {
    let app = Router::new().route(
        "/posts.json",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            "[]"
        }),
    );
    let base_url = serve(app);
    let http = build_client(Duration::from_millis(300), "127.0.0.1:53".parse().unwrap()).unwrap();
    let credential = Credential {
        login: "alice".to_string(),
        api_key: "secret".to_string(),
    };
    let client = DanbooruClient::new(http, &base_url, credential).unwrap();

    match client.posts(&[], 40, 1, false).await {
        Err(Error::NetworkError(e)) => {
            assert!(e.is_timeout(), "{:?}", e);
            assert!(!e.to_string().contains("secret"));
        }
        other => panic!("expected NetworkError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_hostnames_resolve_through_pinned_server() {
    // A nameserver that records queries and never answers.
    let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let dns_server = socket.local_addr().unwrap();
    let received = tokio::spawn(async move {
        let mut buf = [0u8; 512];
        let (len, _) = socket.recv_from(&mut buf).await.unwrap();
        len
    });

    let http = build_client(Duration::from_millis(500), dns_server).unwrap();
    let credential = Credential {
        login: "alice".to_string(),
        api_key: "secret".to_string(),
    };
    let client = DanbooruClient::new(http, "http://danbooru.example.org", credential).unwrap();

    let result = client.posts(&[], 40, 1, false).await;
    assert!(matches!(result, Err(Error::NetworkError(_))), "{:?}", result);

    let len = tokio::time::timeout(Duration::from_secs(2), received)
        .await
        .expect("no DNS query reached the pinned server")
        .unwrap();
    // DNS header alone is 12 bytes.
    assert!(len > 12, "{}", len);
}

async fn echo_artist(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params["search[is_banned]"], "true");
    assert_eq!(params["search[order]"], "name");
    let name = params["search[query]"].clone();
    // Stagger responses so that requests overlap.
    let delay = name.len() as u64 * 5;
    tokio::time::sleep(Duration::from_millis(delay)).await;
    Json(json!([{
        "id": name.len(),
        "name": name,
        "other_names": [format!("{}_alt", name), format!("{}_alt", name)],
        "group_name": "",
        "is_banned": true,
    }]))
}

#[tokio::test]
async fn test_concurrent_artists_do_not_mix() {
    let app = Router::new().route("/artists.json", get(echo_artist));
    let client = client(&serve(app));

    let names = ["a", "bbbbbbbb", "ccc", "dddddd", "ee", "f f"];
    let results = futures::future::join_all(names.iter().map(|name| {
        let client = client.clone();
        async move { client.artists(name, 50, 1).await }
    }))
    .await;

    for (name, result) in names.iter().zip(results) {
        let artists = result.unwrap();
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].name, *name);
        assert_eq!(artists[0].other_names, vec![format!("{}_alt", name); 2]);
        assert_eq!(artists[0].post_count, 0);
    }
}

#[test]
fn test_redact_hides_api_key() {
    let url = url::Url::parse("https://example.org/posts.json?tags=cat&login=alice&api_key=secret").unwrap();
    let redacted = super::redact(&url);
    assert!(!redacted.contains("secret"));
    assert!(redacted.contains("api_key=***") || redacted.contains("api_key=%2A%2A%2A"));
    assert!(redacted.contains("login=alice"));
}
