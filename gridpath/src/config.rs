use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// File locations used by the `gridpath` binary. Constructed once at startup
/// and handed to whatever needs it; the search itself takes no configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to their defaults
pub struct Config {
    /// JSON file with the start and end labels
    pub file_breaks: PathBuf,
    /// JSON adjacency file, read unless `graph_image` is set (then written)
    pub file_graph: PathBuf,
    /// Output of the A* search
    pub file_path: PathBuf,
    /// Output of the Theta* search
    pub file_path_theta: PathBuf,
    /// Optional maze image to build the graph from
    pub graph_image: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_breaks: "breaks.json".into(),
            file_graph: "graph.json".into(),
            file_path: "path.txt".into(),
            file_path_theta: "path2.txt".into(),
            graph_image: None,
        }
    }
}

impl Config {
    /// Read the configuration from a JSON file. A missing file gives the
    /// defaults, a file that does not parse is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("{} not found, using default configuration", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }
}
