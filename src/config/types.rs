use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Directory scanned for playable files at startup
    #[serde(default = "default_media_root")]
    pub root: PathBuf,

    /// File extensions to index (empty = every file)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_media_root() -> PathBuf {
    PathBuf::from("./media")
}

fn default_extensions() -> Vec<String> {
    ["mp4", "m4v", "mkv", "webm", "mov", "avi"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_media_root(),
            extensions: default_extensions(),
        }
    }
}
