//! End-to-end redirect resolution over HTTP.

use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_store_seed_redirects() {
    let server = common::start_server(|_, _| {}).await;
    let client = common::client();

    let res = client.get(server.url("/fb")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "https://facebook.com");
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_every_layer_reachable() {
    let server = common::start_server(|_, _| {}).await;
    let client = common::client();

    let cases = [
        ("/twtr", "https://twitter.com"),
        ("/yt", "https://youtube.com"),
        ("/urlshort", "https://github.com/gophercises/urlshort"),
        ("/urlshort-godoc", "https://godoc.org/github.com/gophercises/urlshort"),
    ];
    for (path, location) in cases {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "path {}", path);
        assert_eq!(res.headers()["location"], location, "path {}", path);
    }
}

#[tokio::test]
async fn test_unknown_path_gets_default_page() {
    let server = common::start_server(|_, config| {
        config.fallback.status = 200;
        config.fallback.body = "Hello, world!".into();
    })
    .await;

    let res = common::client().get(server.url("/unknown")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("location").is_none());
    assert_eq!(res.text().await.unwrap(), "Hello, world!");
}

#[tokio::test]
async fn test_any_method_is_resolved() {
    let server = common::start_server(|_, _| {}).await;

    let res = common::client().post(server.url("/ig")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "https://instagram.com");
}

#[tokio::test]
async fn test_file_sources_and_precedence() {
    let server = common::start_server(|dir, config| {
        let yaml = dir.path().join("paths.yaml");
        let json = dir.path().join("paths.json");
        std::fs::write(&yaml, "- path: /a\n  url: https://x.example\n- path: /g\n  url: https://yaml.example\n").unwrap();
        std::fs::write(&json, r#"[{"path":"/g","url":"https://google.com"}]"#).unwrap();
        config.sources.yaml_file = Some(yaml);
        config.sources.json_file = Some(json);
    })
    .await;
    let client = common::client();

    let res = client.get(server.url("/a")).send().await.unwrap();
    assert_eq!(res.headers()["location"], "https://x.example");

    // json sits in front of yaml
    let res = client.get(server.url("/g")).send().await.unwrap();
    assert_eq!(res.headers()["location"], "https://google.com");

    // the built-in samples are replaced by the files
    let res = client.get(server.url("/urlshort")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_source_aborts_startup() {
    let dir = tempfile::TempDir::new().unwrap();
    let yaml = dir.path().join("paths.yaml");
    std::fs::write(&yaml, "- path: /a\n  url:\n- path: [1]\n  url: https://x.example\n").unwrap();

    let mut config = common::test_config(&dir);
    config.sources.yaml_file = Some(yaml);

    let err = urlshort::HttpServer::new(config).err().unwrap();
    assert!(matches!(err, urlshort::routing::ConstructionError::Decode(_)));
}
