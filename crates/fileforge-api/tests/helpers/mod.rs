//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p fileforge-api`.

pub mod fixtures;

use axum_test::TestServer;
use fileforge_api::setup::routes;
use fileforge_api::state::AppState;
use fileforge_core::Config;
use tempfile::TempDir;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", routes::API_PREFIX, path)
}

/// Test application: server plus the scratch directory it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub scratch: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Files currently present in the scratch directory.
    pub fn scratch_entries(&self) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(self.scratch.path())
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }
}

/// Setup a test app with an isolated scratch directory and default limits.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup a test app, letting the caller tweak the configuration.
pub async fn setup_test_app_with(tweak: impl FnOnce(&mut Config)) -> TestApp {
    let scratch = TempDir::new().expect("Failed to create scratch dir");

    let mut config = Config {
        scratch_dir: scratch.path().to_string_lossy().into_owned(),
        ..Config::default()
    };
    tweak(&mut config);
    config.validate().expect("Test config must be valid");

    let state = AppState::new(config.clone());
    let app = routes::setup_routes(&config, state);
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp { server, scratch }
}
