//! Single-purpose endpoint contracts: characters (both envelope
//! shapes), banner suppression, likes, and comments.

use std::sync::Arc;

use serde_json::json;

use inkwire_common::{Config, Language};
use wp_client::testing::MockTransport;
use wp_client::{CharacterQuery, CharacterSort, NewComment, SortOrder, WpClient, WpError};

fn config() -> Config {
    let mut config = Config::for_site("https://site.example.com");
    config.device_id = "dvc-test".to_string();
    config
}

fn client(mock: MockTransport) -> (WpClient, Arc<MockTransport>) {
    let transport = Arc::new(mock);
    (
        WpClient::with_transport(config(), transport.clone()),
        transport,
    )
}

#[tokio::test]
async fn characters_bare_array() {
    let mock = MockTransport::new().on_json(
        "/wp-json/gdb/v1/characters?",
        200,
        &json!([{"id": 1, "name": "Klee"}, {"id": 2, "name": "Hu Tao"}]),
    );
    let (client, _) = client(mock);

    let characters = client
        .fetch_characters(&CharacterQuery::default())
        .await
        .unwrap();

    assert_eq!(characters.len(), 2);
    assert_eq!(characters[0].name, "Klee");
}

#[tokio::test]
async fn characters_items_wrapped() {
    let mock = MockTransport::new().on_json(
        "/wp-json/gdb/v1/characters?",
        200,
        &json!({"items": [{"id": 1, "meta": {"name": "Klee", "element": "pyro"}}]}),
    );
    let (client, _) = client(mock);

    let characters = client
        .fetch_characters(&CharacterQuery::default())
        .await
        .unwrap();

    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].element, "pyro");
}

#[tokio::test]
async fn character_query_parameters_forwarded() {
    let mock = MockTransport::new().on_json("/wp-json/gdb/v1/characters?", 200, &json!([]));
    let (client, transport) = client(mock);

    let query = CharacterQuery {
        search: Some("tao".to_string()),
        element: Some("pyro".to_string()),
        rarity: Some("5".to_string()),
        sort_by: CharacterSort::Rarity,
        order: SortOrder::Desc,
        lang: Language::Id,
        ..CharacterQuery::default()
    };
    client.fetch_characters(&query).await.unwrap();

    let url = &transport.requests()[0].url;
    for expected in [
        "search=tao",
        "element=pyro",
        "rarity=5",
        "orderby=rarity",
        "order=desc",
        "lang=id",
    ] {
        assert!(url.contains(expected), "missing {expected} in {url}");
    }
}

#[tokio::test]
async fn characters_bad_shape_is_an_error() {
    let mock =
        MockTransport::new().on_json("/wp-json/gdb/v1/characters?", 200, &json!("just a string"));
    let (client, _) = client(mock);

    let err = client
        .fetch_characters(&CharacterQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WpError::Shape { .. }));
}

#[tokio::test]
async fn characters_http_error_propagates() {
    let mock = MockTransport::new().on("/wp-json/gdb/v1/characters?", 502, "bad gateway");
    let (client, _) = client(mock);

    let err = client
        .fetch_characters(&CharacterQuery::default())
        .await
        .unwrap_err();

    match err {
        WpError::Http { status, snippet, .. } => {
            assert_eq!(status, 502);
            assert_eq!(snippet, "bad gateway");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn character_by_id_accepts_both_shapes() {
    let mock = MockTransport::new()
        .on_json("/characters/1?", 200, &json!({"id": 1, "name": "Klee"}))
        .on_json("/characters/2?", 200, &json!({"items": [{"id": 2, "name": "Hu Tao"}]}));
    let (client, _) = client(mock);

    let direct = client.fetch_character(1, Language::En).await.unwrap();
    assert_eq!(direct.name, "Klee");

    let wrapped = client.fetch_character(2, Language::En).await.unwrap();
    assert_eq!(wrapped.name, "Hu Tao");
}

#[tokio::test]
async fn banner_parses_when_healthy() {
    let mock = MockTransport::new().on_json(
        "/wp-json/appkit/v1/banner",
        200,
        &json!({"id": 3, "image": "https://cdn.example.com/b.png", "hide": "no"}),
    );
    let (client, _) = client(mock);

    let banner = client.fetch_banner().await.unwrap();
    assert!(banner.visible());
}

#[tokio::test]
async fn banner_failure_is_silent() {
    let mock = MockTransport::new().on("/wp-json/appkit/v1/banner", 500, "boom");
    let (first_client, _) = client(mock);

    assert!(first_client.fetch_banner().await.is_none());

    // unmatched URL -> 404 -> still no banner, still no error
    let (client, _) = client(MockTransport::new());
    assert!(client.fetch_banner().await.is_none());
}

#[tokio::test]
async fn send_like_posts_device_id_and_coerces_count() {
    let mock = MockTransport::new().on_json("/wp-json/appkit/v1/like", 200, &json!({"count": "13"}));
    let (client, transport) = client(mock);

    let count = client.send_like(101).await.unwrap();

    assert_eq!(count, 13, "string-encoded count coerced");
    let requests = transport.requests();
    assert_eq!(requests[0].method, "POST");
    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(body["post_id"], json!(101));
    assert_eq!(body["device_id"], json!("dvc-test"));
}

#[tokio::test]
async fn send_like_error_carries_diagnostics() {
    let mock = MockTransport::new().on("/wp-json/appkit/v1/like", 429, "slow down");
    let (client, _) = client(mock);

    match client.send_like(101).await.unwrap_err() {
        WpError::Http { status, url, snippet } => {
            assert_eq!(status, 429);
            assert!(url.contains("/wp-json/appkit/v1/like"));
            assert_eq!(snippet, "slow down");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_comment_accepts_200_and_201() {
    for status in [200u16, 201] {
        let mock = MockTransport::new().on("/wp-json/wp/v2/comments", status, "{}");
        let (client, transport) = client(mock);

        let comment = NewComment {
            post: 101,
            author_name: "rin".to_string(),
            author_email: "rin@example.com".to_string(),
            content: "nice post".to_string(),
        };
        client.create_comment(&comment).await.unwrap();

        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body["post"], json!(101));
        assert_eq!(body["content"], json!("nice post"));
    }
}

#[tokio::test]
async fn create_comment_other_status_is_an_error() {
    let mock = MockTransport::new().on("/wp-json/wp/v2/comments", 403, "closed");
    let (client, _) = client(mock);

    let comment = NewComment {
        post: 101,
        author_name: "rin".to_string(),
        author_email: "rin@example.com".to_string(),
        content: "late".to_string(),
    };
    assert!(matches!(
        client.create_comment(&comment).await.unwrap_err(),
        WpError::Http { status: 403, .. }
    ));
}

#[tokio::test]
async fn fetch_comments_parses_and_defaults_author() {
    let mock = MockTransport::new().on_json(
        "/wp-json/wp/v2/comments?",
        200,
        &json!([
            {"id": 1, "post": 101, "author_name": "rin", "content": {"rendered": "<p>hi</p>"}},
            {"id": 2, "post": 101, "content": {"rendered": "<p>anon here</p>"}}
        ]),
    );
    let (client, _) = client(mock);

    let comments = client.fetch_comments(101, 1, 10).await.unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].body, "hi");
    assert_eq!(comments[1].author, "anonymous");
}
