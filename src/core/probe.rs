//! # Filesystem Probe
//!
//! Every filesystem question the resolution logic asks goes through the
//! [`FilesystemProbe`] trait. Production code uses [`OsProbe`]; unit tests
//! substitute an in-memory fake so no real directories are needed.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

/// The small set of filesystem capabilities resolution depends on.
pub trait FilesystemProbe: std::fmt::Debug {
    /// Resolves every symlink in an absolute path. Components that do not exist
    /// are appended structurally to the resolved existing ancestor.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// True if something (following symlinks) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// True if `path` is a regular file (following symlinks).
    fn is_file(&self, path: &Path) -> bool;

    /// True if `path` is a directory (following symlinks).
    fn is_dir(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Lists the entries directly inside `path`.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Normalizes `.` and `..` components without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsProbe;

impl FilesystemProbe for OsProbe {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        match dunce::canonicalize(path) {
            Ok(resolved) => return Ok(resolved),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        // Walk up to the nearest ancestor that exists, then re-attach the tail.
        let normalized = normalize_lexically(path);
        let mut existing = normalized.as_path();
        let mut tail: Vec<&OsStr> = Vec::new();
        loop {
            match dunce::canonicalize(existing) {
                Ok(mut resolved) => {
                    for name in tail.iter().rev() {
                        resolved.push(name);
                    }
                    return Ok(resolved);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    match (existing.parent(), existing.file_name()) {
                        (Some(parent), Some(name)) => {
                            tail.push(name);
                            existing = parent;
                        }
                        _ => return Ok(normalized.clone()),
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::{FilesystemProbe, normalize_lexically};
    use std::collections::{BTreeMap, BTreeSet};
    use std::io::{self, ErrorKind};
    use std::path::{Path, PathBuf};

    /// An in-memory filesystem: files with contents, directories and symlinks.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct MemoryProbe {
        files: BTreeMap<PathBuf, String>,
        dirs: BTreeSet<PathBuf>,
        symlinks: BTreeMap<PathBuf, PathBuf>,
    }

    impl MemoryProbe {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_file(mut self, path: &str, contents: &str) -> Self {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent() {
                self.add_dir(parent);
            }
            self.files.insert(path, contents.to_string());
            self
        }

        pub(crate) fn with_dir(mut self, path: &str) -> Self {
            self.add_dir(Path::new(path));
            self
        }

        /// `target` may be relative to the link's parent, like a real symlink.
        pub(crate) fn with_symlink(mut self, link: &str, target: &str) -> Self {
            let link = PathBuf::from(link);
            let target = match link.parent() {
                Some(parent) => normalize_lexically(&parent.join(target)),
                None => PathBuf::from(target),
            };
            if let Some(parent) = link.parent() {
                self.add_dir(parent);
            }
            self.symlinks.insert(link, target);
            self
        }

        fn add_dir(&mut self, path: &Path) {
            for ancestor in path.ancestors() {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                self.dirs.insert(ancestor.to_path_buf());
            }
        }

        fn resolve(&self, path: &Path) -> PathBuf {
            let mut resolved = PathBuf::new();
            for component in normalize_lexically(path).components() {
                resolved.push(component.as_os_str());
                // Bounded so a symlink loop cannot hang a test.
                let mut hops = 0;
                while let Some(target) = self.symlinks.get(&resolved) {
                    resolved = target.clone();
                    hops += 1;
                    if hops > 32 {
                        break;
                    }
                }
            }
            resolved
        }
    }

    impl FilesystemProbe for MemoryProbe {
        fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
            Ok(self.resolve(path))
        }

        fn exists(&self, path: &Path) -> bool {
            self.is_file(path) || self.is_dir(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.contains_key(&self.resolve(path))
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.contains(&self.resolve(path))
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.files
                .get(&self.resolve(path))
                .cloned()
                .ok_or_else(|| io::Error::from(ErrorKind::NotFound))
        }

        fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
            let dir = self.resolve(path);
            if !self.dirs.contains(&dir) {
                return Err(io::Error::from(ErrorKind::NotFound));
            }
            let children: BTreeSet<PathBuf> = self
                .files
                .keys()
                .chain(self.dirs.iter())
                .chain(self.symlinks.keys())
                .filter(|p| p.parent() == Some(dir.as_path()))
                .cloned()
                .collect();
            Ok(children.into_iter().collect())
        }
    }
}
