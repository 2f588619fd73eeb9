//! Document sources feeding the index builder.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::document::Document;
use crate::error::{RagError, Result};

/// Something that can produce the document set for a knowledge base build.
///
/// Individual unreadable items should be skipped with a warning rather than
/// failing the whole load.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Load every available document.
    async fn load(&self) -> Result<Vec<Document>>;
}

/// Loads every `.txt` file directly inside a directory.
///
/// Files are returned sorted by name. Each document's `id` and `source` are
/// the file name. Subdirectories are not descended into.
#[derive(Debug, Clone)]
pub struct DirectoryDocumentSource {
    root: PathBuf,
}

impl DirectoryDocumentSource {
    /// Create a source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this source reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn text_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(RagError::DocumentSourceError {
                source_name: self.root.display().to_string(),
                message: "docs directory not found".to_string(),
            });
        }

        let mut files = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry.path().extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
            })
            .map(|entry| entry.into_path())
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl DocumentSource for DirectoryDocumentSource {
    async fn load(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        for path in self.text_files()? {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => documents.push(Document::new(name, text)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable document");
                }
            }
        }
        debug!(root = %self.root.display(), document_count = documents.len(), "loaded documents");
        Ok(documents)
    }
}

/// Serves a fixed list of documents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentSource {
    documents: Vec<Document>,
}

impl InMemoryDocumentSource {
    /// Create a source over the given documents.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl DocumentSource for InMemoryDocumentSource {
    async fn load(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }
}
