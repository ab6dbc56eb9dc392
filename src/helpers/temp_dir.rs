use std::path::Path;

use tracing::trace;

/// Directory that is removed, with everything in it, when dropped.
#[derive(Debug)]
pub struct TempDir {
    inner: tempfile::TempDir,
}
impl TempDir {
    /// Creates a new, uniquely named directory under `root`. The directory is
    /// created exclusively, so two live `TempDir`s never share a path.
    pub fn with_prefix_in(root: &Path, dir_name_prefix: &str) -> std::io::Result<Self> {
        let inner = tempfile::Builder::new()
            .prefix(dir_name_prefix)
            .tempdir_in(root)?;
        trace!(path = ?inner.path(), "Created temp dir");

        Ok(Self { inner })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        trace!(path = ?self.inner.path(), "Removing temp dir");
    }
}
