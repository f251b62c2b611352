//! Reading a source tree into a stream of files
use crate::error::{Error, Result};
use crate::file::SourceFile;
use futures::stream::{self, BoxStream, StreamExt};
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// All regular files below `root`, sorted by path
///
/// Hidden entries (names starting with `.`) are skipped, and so are entries
/// whose names are not valid UTF-8.
pub async fn collect_paths(root: &Path) -> Result<Vec<PathBuf>> {
    let mut pending = vec![root.to_path_buf()];
    let mut files = Vec::new();

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| Error::io(&dir, e))?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| Error::io(&dir, e))? {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                warn!("Skipping entry with non UTF-8 name: {}", path.display());
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let file_type = entry.file_type().await.map_err(|e| Error::io(&path, e))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Path of `path` relative to `root`, `/`-separated
///
/// `None` when a component is not valid UTF-8.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let components = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(components.join("/"))
}

/// Read `paths` one at a time, as the consumer asks for them
///
/// A path that is not valid UTF-8 yields an [`Error::Io`] item.
pub fn read_files(root: &Path, paths: Vec<PathBuf>) -> BoxStream<'static, Result<SourceFile>> {
    let root = root.to_path_buf();
    stream::iter(paths)
        .then(move |path| {
            let relative = relative_path(&root, &path);
            async move {
                let relative = relative.ok_or_else(|| {
                    Error::io(
                        &path,
                        io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"),
                    )
                })?;
                let contents = tokio::fs::read(&path)
                    .await
                    .map_err(|e| Error::io(&path, e))?;
                Ok::<_, Error>(SourceFile::new(relative, contents))
            }
        })
        .boxed()
}
