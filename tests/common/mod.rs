//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which writes media files into a temporary media
//! root, indexes them, and builds a full [`AppContext`]. The [`with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use lexicon::server::{create_router, AppContext};
use lexicon_playback::Catalog;

/// Test harness wrapping an [`AppContext`] over a temporary media root.
pub struct TestHarness {
    pub ctx: AppContext,
    pub media_root: tempfile::TempDir,
}

impl TestHarness {
    /// Create a harness whose media root holds `files` (name, contents).
    pub fn new(files: &[(&str, Vec<u8>)]) -> Self {
        let media_root = tempfile::tempdir().expect("failed to create media root");
        let videos = media_root.path().join("videos");
        std::fs::create_dir_all(&videos).expect("failed to create videos dir");

        for (name, data) in files {
            std::fs::write(videos.join(name), data).expect("failed to write media file");
        }

        let catalog = Catalog::scan(media_root.path(), &[]);
        let ctx = AppContext::new(catalog);

        Self { ctx, media_root }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server(files: &[(&str, Vec<u8>)]) -> (Self, SocketAddr) {
        let harness = Self::new(files);
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Path of a file written by the harness.
    pub fn media_path(&self, name: &str) -> PathBuf {
        self.media_root.path().join("videos").join(name)
    }
}

/// Deterministic file contents of `len` bytes.
pub fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Playback URL for `file_name`.
pub fn playback_url(addr: SocketAddr, file_name: &str) -> String {
    format!("http://{addr}/api/v1/video/playback/{file_name}/")
}
