//! Named stub collection: the built-in stubs, optionally overridden by a
//! directory of `*.stub` files.
//!
//! The directory is walked recursively; each `*.stub` file is keyed by its
//! file stem, so `stubs/persistence/mapper.stub` replaces the built-in
//! `mapper`. Unreadable files are skipped with a `WARN` log.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use domgen_core::{application::ApplicationError, error::DomgenResult};

use crate::builtin_stubs;
use crate::filesystem::map_io_error;

const STUB_EXTENSION: &str = "stub";

/// Where a stub's text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubOrigin {
    Builtin,
    File(PathBuf),
}

#[derive(Debug, Clone)]
struct Stub {
    text: String,
    origin: StubOrigin,
}

#[derive(Debug, Clone)]
pub struct StubLibrary {
    stubs: BTreeMap<String, Stub>,
}

impl StubLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self {
            stubs: BTreeMap::new(),
        }
    }

    /// The stubs that ship with domgen.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        for (name, text) in builtin_stubs::all() {
            library.insert(name, text, StubOrigin::Builtin);
        }
        library
    }

    /// Built-ins, overridden by `dir` when given.
    pub fn load(dir: Option<&Path>) -> DomgenResult<Self> {
        let library = Self::builtin();
        match dir {
            Some(dir) => library.with_overrides_from(dir),
            None => Ok(library),
        }
    }

    /// Add every `*.stub` under `dir`, replacing same-named entries.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn with_overrides_from(mut self, dir: &Path) -> DomgenResult<Self> {
        if !dir.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: dir.to_path_buf(),
                reason: "stub directory not found".into(),
            }
            .into());
        }

        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                ApplicationError::FilesystemError {
                    reason: format!("directory walk error: {e}"),
                    path,
                }
            })?;

            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(STUB_EXTENSION)
            {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match std::fs::read_to_string(path) {
                Ok(text) => {
                    debug!(name, path = %path.display(), "stub override");
                    self.insert(name, text, StubOrigin::File(path.to_path_buf()));
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %map_io_error(path, e, "read stub"),
                        "skipping unreadable stub"
                    );
                }
            }
        }

        Ok(self)
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>, origin: StubOrigin) {
        self.stubs.insert(
            name.into(),
            Stub {
                text: text.into(),
                origin,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.stubs.get(name).map(|stub| stub.text.as_str())
    }

    /// Like [`get`](Self::get), but a missing stub is an error.
    pub fn require(&self, name: &str) -> DomgenResult<&str> {
        self.get(name).ok_or_else(|| {
            ApplicationError::StubNotFound {
                path: PathBuf::from(format!("{name}.{STUB_EXTENSION}")),
            }
            .into()
        })
    }

    pub fn origin(&self, name: &str) -> Option<&StubOrigin> {
        self.stubs.get(name).map(|stub| &stub.origin)
    }

    /// Stub names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stubs.keys().map(String::as_str)
    }
}

impl Default for StubLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtin_persistence_stubs() {
        let library = StubLibrary::builtin();

        assert_eq!(
            library.names().collect::<Vec<_>>(),
            vec!["db-repository", "mapper", "repository-interface"]
        );
        assert!(library.get("mapper").unwrap().contains("{property_mappings}"));
        assert_eq!(library.origin("mapper"), Some(&StubOrigin::Builtin));
    }

    #[test]
    fn directory_overrides_by_file_stem() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("persistence");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("mapper.stub"), "custom {class}").unwrap();
        fs::write(temp.path().join("entity.stub"), "class {class} {}").unwrap();
        fs::write(temp.path().join("README.md"), "ignored").unwrap();

        let library = StubLibrary::load(Some(temp.path())).unwrap();

        assert_eq!(library.get("mapper"), Some("custom {class}"));
        assert_eq!(library.get("entity"), Some("class {class} {}"));
        assert!(library.get("README").is_none());
        assert_eq!(
            library.origin("mapper"),
            Some(&StubOrigin::File(nested.join("mapper.stub")))
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(StubLibrary::load(Some(Path::new("/no/such/stubs"))).is_err());
    }

    #[test]
    fn require_reports_missing_stub() {
        let err = StubLibrary::new().require("mapper").unwrap_err();
        assert!(err.to_string().contains("mapper.stub"));
    }
}
