//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;
use urlshort::admin::serve_admin;
use urlshort::config::AppConfig;
use urlshort::http::HttpServer;
use urlshort::lifecycle::Shutdown;

pub const ADMIN_KEY: &str = "test-admin-key";

/// A running redirect server (and admin API, when enabled).
pub struct TestServer {
    pub addr: SocketAddr,
    pub admin_addr: Option<SocketAddr>,
    pub shutdown: Shutdown,
    pub dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    #[allow(dead_code)]
    pub fn admin_url(&self, path: &str) -> String {
        let addr = self.admin_addr.expect("admin API not started");
        format!("http://{}{}", addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config with the store inside `dir` and the admin API enabled.
pub fn test_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.store.path = dir.path().join("pathMap.db");
    config.admin.enabled = true;
    config.admin.api_key = ADMIN_KEY.to_string();
    config
}

/// Start servers on ephemeral ports. `configure` may adjust the config and
/// write source files into the temp dir.
pub async fn start_server<F>(configure: F) -> TestServer
where
    F: FnOnce(&TempDir, &mut AppConfig),
{
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    configure(&dir, &mut config);

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();

    let admin_addr = match server.admin_router() {
        Some(router) => {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(serve_admin(router, listener, shutdown.subscribe()));
            Some(addr)
        }
        None => None,
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        admin_addr,
        shutdown,
        dir,
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
