//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    io::{self, Cursor, Read, Write},
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};

use faasd_core::application::ports::{EntryKind, Filesystem};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can hand one clone to the
/// service and inspect another afterwards.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, MemoryFile>,
    directories: HashMap<PathBuf, u32>,
    denied_dirs: HashSet<PathBuf>,
    denied_files: HashSet<PathBuf>,
}

#[derive(Debug, Default, Clone)]
struct MemoryFile {
    content: Vec<u8>,
    mode: u32,
}

impl MemoryFilesystemInner {
    fn is_denied(set: &HashSet<PathBuf>, path: &Path) -> bool {
        set.iter().any(|prefix| path.starts_with(prefix))
    }

    fn parent_is_dir(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.directories.contains_key(parent),
            _ => true,
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file (and its parent directories) - testing helper.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                inner.directories.entry(current.clone()).or_insert(0o755);
            }
        }
        inner.files.insert(
            path.to_path_buf(),
            MemoryFile {
                content: content.as_ref().to_vec(),
                mode: 0o644,
            },
        );
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).map(|f| f.content.clone())
    }

    /// Mode a file was created with.
    pub fn file_mode(&self, path: impl AsRef<Path>) -> Option<u32> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).map(|f| f.mode)
    }

    /// Mode a directory was created with.
    pub fn dir_mode(&self, path: impl AsRef<Path>) -> Option<u32> {
        let inner = self.inner.read().ok()?;
        inner.directories.get(path.as_ref()).copied()
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        let inner = self.inner.read().unwrap();
        inner.directories.contains_key(path.as_ref())
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut files: Vec<_> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    /// Make directory creation at or below `prefix` fail with
    /// `PermissionDenied`.
    pub fn deny_dirs_under(&self, prefix: impl Into<PathBuf>) {
        self.inner.write().unwrap().denied_dirs.insert(prefix.into());
    }

    /// Make file creation at or below `prefix` fail with `PermissionDenied`.
    pub fn deny_files_under(&self, prefix: impl Into<PathBuf>) {
        self.inner.write().unwrap().denied_files.insert(prefix.into());
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn entry_kind(&self, path: &Path) -> EntryKind {
        let Ok(inner) = self.inner.read() else {
            return EntryKind::Missing;
        };
        if inner.directories.contains_key(path) {
            EntryKind::Directory
        } else if inner.files.contains_key(path) {
            EntryKind::Other
        } else {
            EntryKind::Missing
        }
    }

    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;

        if MemoryFilesystemInner::is_denied(&inner.denied_dirs, path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("{} is a file", current.display()),
                ));
            }
            inner.directories.entry(current.clone()).or_insert(mode);
        }

        Ok(())
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        let file = inner
            .files
            .get(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        Ok(Box::new(Cursor::new(file.content.clone())))
    }

    fn create_file(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write + Send>> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;

        if MemoryFilesystemInner::is_denied(&inner.denied_files, path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        if !inner.parent_is_dir(path) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        if inner.directories.contains_key(path) {
            return Err(io::Error::from(io::ErrorKind::IsADirectory));
        }

        // Truncate, keeping the original mode like open(2) does.
        let entry = inner.files.entry(path.to_path_buf()).or_insert(MemoryFile {
            content: Vec::new(),
            mode,
        });
        entry.content.clear();

        Ok(Box::new(MemoryWriter {
            inner: Arc::clone(&self.inner),
            path: path.to_path_buf(),
        }))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if inner.directories.contains_key(to) {
            return Err(io::Error::from(io::ErrorKind::IsADirectory));
        }
        let file = inner
            .files
            .remove(from)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        inner.files.insert(to.to_path_buf(), file);
        Ok(())
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        let Ok(inner) = self.inner.read() else {
            return false;
        };
        let (a, b) = (normalize(a), normalize(b));
        a == b && inner.files.contains_key(&a)
    }
}

/// Drop `.` components so `/release/./x` and `/release/x` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Write handle appending to one in-memory file.
struct MemoryWriter {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
    path: PathBuf,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        let file = inner
            .files
            .get_mut(&self.path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        file.content.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn lock_poisoned() -> io::Error {
    io::Error::other("memory filesystem lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_all_records_ancestors_and_mode() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/run/faasd/secrets"), 0o700).unwrap();

        assert_eq!(fs.entry_kind(Path::new("/run")), EntryKind::Directory);
        assert_eq!(fs.entry_kind(Path::new("/run/faasd/secrets")), EntryKind::Directory);
        assert_eq!(fs.dir_mode("/run/faasd/secrets"), Some(0o700));
    }

    #[test]
    fn create_file_requires_parent() {
        let fs = MemoryFilesystem::new();
        let err = match fs.create_file(Path::new("/run/faasd/resolv.conf"), 0o644) {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn create_file_truncates_and_keeps_mode() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/run/faasd/prometheus.yml", "old and long content");

        let mut w = fs.create_file(Path::new("/run/faasd/prometheus.yml"), 0o600).unwrap();
        w.write_all(b"new").unwrap();

        assert_eq!(fs.read_file("/run/faasd/prometheus.yml").unwrap(), b"new");
        assert_eq!(fs.file_mode("/run/faasd/prometheus.yml"), Some(0o644));
    }

    #[test]
    fn file_in_the_way_blocks_directory_creation() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/run/faasd", "stale");

        let err = fs
            .create_dir_all(Path::new("/run/faasd/secrets"), 0o700)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);
        assert_eq!(fs.entry_kind(Path::new("/run/faasd")), EntryKind::Other);
    }

    #[test]
    fn denied_prefixes_fail_with_permission_denied() {
        let fs = MemoryFilesystem::new();
        fs.deny_dirs_under("/run/faas-containerd");
        fs.create_dir_all(Path::new("/run/faasd"), 0o700).unwrap();
        fs.deny_files_under("/run/faasd");

        assert_eq!(
            fs.create_dir_all(Path::new("/run/faas-containerd"), 0o700)
                .unwrap_err()
                .kind(),
            io::ErrorKind::PermissionDenied
        );
        let err = match fs.create_file(Path::new("/run/faasd/resolv.conf"), 0o644) {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn rename_replaces_destination() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/run/faasd/secrets/.basic-auth-password.tmp", "new");
        fs.add_file("/run/faasd/secrets/basic-auth-password", "");

        fs.rename(
            Path::new("/run/faasd/secrets/.basic-auth-password.tmp"),
            Path::new("/run/faasd/secrets/basic-auth-password"),
        )
        .unwrap();

        assert_eq!(
            fs.list_files(),
            vec![PathBuf::from("/run/faasd/secrets/basic-auth-password")]
        );
        assert_eq!(fs.read_file("/run/faasd/secrets/basic-auth-password").unwrap(), b"new");
    }

    #[test]
    fn same_file_ignores_dot_components() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/run/faasd/resolv.conf", "x");

        assert!(fs.same_file(
            Path::new("/run/faasd/./resolv.conf"),
            Path::new("/run/faasd/resolv.conf")
        ));
        assert!(!fs.same_file(
            Path::new("/run/faasd/prometheus.yml"),
            Path::new("/run/faasd/prometheus.yml")
        ));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        other.add_file("/src/resolv.conf", "x");

        assert_eq!(fs.list_files(), vec![PathBuf::from("/src/resolv.conf")]);
    }
}
