//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - An in-memory app with a temporary upload root
//! - Authentication helpers (signup, login, bearer headers)
//! - Multipart form builders
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use postfeed::backend::routes::create_router;
use postfeed::backend::server::{build_state, AppState, ServerConfig};
use postfeed::backend::store::{FeedStore, MemoryFeedStore};
use tempfile::TempDir;

/// Running test application
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    /// Dropped with the app
    pub upload_root: TempDir,
}

impl TestApp {
    /// Absolute path of a stored relative image path
    pub fn image_path(&self, relative: &str) -> PathBuf {
        self.upload_root.path().join(relative)
    }
}

/// Spawn an app backed by the in-memory store
pub fn spawn_app() -> TestApp {
    spawn_app_with_store(Arc::new(MemoryFeedStore::new()))
}

pub fn spawn_app_with_store(store: Arc<dyn FeedStore>) -> TestApp {
    let upload_root = tempfile::tempdir().expect("Failed to create upload root");
    let state = build_state(ServerConfig::for_tests(upload_root.path()), store);
    let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");

    TestApp {
        server,
        state,
        upload_root,
    }
}

/// Wait until a spawned file deletion has run
pub async fn wait_until_removed(path: &std::path::Path) -> bool {
    for _ in 0..50 {
        if !path.exists() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    !path.exists()
}
