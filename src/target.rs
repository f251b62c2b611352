//! Destinations for translated files
//!
//! The pipeline awaits every write before pulling the next derived file, so a
//! slow target slows the whole stage down instead of letting output pile up.

use crate::error::{Error, Result};
use crate::file::SourceFile;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Consumer of the pipeline's output
#[async_trait]
pub trait Target: Send {
    /// Accept one translated file
    async fn write(&mut self, file: SourceFile) -> Result<()>;

    /// Called once after the last file of a successful run
    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects outputs in memory
#[async_trait]
impl Target for Vec<SourceFile> {
    async fn write(&mut self, file: SourceFile) -> Result<()> {
        self.push(file);
        Ok(())
    }
}

/// Writes every output below a root directory, creating parents as needed
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    root: PathBuf,
    written: usize,
}

impl DirectoryTarget {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryTarget {
            root: root.into(),
            written: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

#[async_trait]
impl Target for DirectoryTarget {
    async fn write(&mut self, file: SourceFile) -> Result<()> {
        let path = self.root.join(file.path());
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(parent, e))?;
        }
        tokio::fs::write(&path, file.into_contents())
            .await
            .map_err(|e| Error::io(&path, e))?;

        debug!("Wrote {}", path.display());
        self.written += 1;
        Ok(())
    }
}
