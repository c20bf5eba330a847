//! Timeline document storage.
//!
//! Each timeline lives in its own `<id>.json` file under the base directory.
//! There is no index: listing is a directory scan.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{TimelineError, TimelineResult};
use crate::timeline::Timeline;

const DOCUMENT_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct TimelineStore {
    base_dir: PathBuf,
}

impl TimelineStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        TimelineStore {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File path for a timeline id, or None if the id can't name a document.
    fn path_for(&self, id: &str) -> Option<PathBuf> {
        is_valid_id(id).then(|| {
            self.base_dir
                .join(format!("{}.{}", id, DOCUMENT_EXTENSION))
        })
    }

    /// Write (or overwrite) the document for `timeline.id`.
    ///
    /// The document is written to a temporary sibling and renamed into place,
    /// so readers never observe a half-written file.
    pub fn save(&self, timeline: &Timeline) -> TimelineResult<()> {
        let path = self.path_for(&timeline.id).ok_or_else(|| {
            TimelineError::Validation(format!("Invalid timeline id '{}'", timeline.id))
        })?;

        std::fs::create_dir_all(&self.base_dir)?;

        let content = serde_json::to_string_pretty(timeline)
            .map_err(|e| TimelineError::Serialization(e.to_string()))?;

        let tmp_path = path.with_extension(format!("{}.tmp", DOCUMENT_EXTENSION));
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &path)?;

        debug!(id = %timeline.id, path = %path.display(), "saved timeline");
        Ok(())
    }

    /// Load a timeline document. Missing documents are `Ok(None)`.
    pub fn load(&self, id: &str) -> TimelineResult<Option<Timeline>> {
        let Some(path) = self.path_for(id) else {
            return Ok(None);
        };

        if !path.exists() {
            return Ok(None);
        }

        read_document(&path).map(Some)
    }

    /// Remove a timeline document. Returns whether it existed.
    pub fn delete(&self, id: &str) -> TimelineResult<bool> {
        let Some(path) = self.path_for(id) else {
            return Ok(false);
        };

        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(id, "deleted timeline document");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Load every timeline document in the base directory, in directory order.
    pub fn list(&self) -> TimelineResult<Vec<Timeline>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut timelines = Vec::new();

        for entry in std::fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if path.is_file() && path.extension().is_some_and(|e| e == DOCUMENT_EXTENSION) {
                timelines.push(read_document(&path)?);
            }
        }

        debug!(count = timelines.len(), "listed timelines");
        Ok(timelines)
    }
}

fn read_document(path: &Path) -> TimelineResult<Timeline> {
    let content = std::fs::read_to_string(path)?;

    serde_json::from_str(&content).map_err(|source| TimelineError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Ids become file names, so only allow characters that can't escape the base directory.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
