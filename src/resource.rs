use std::env;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use terrors::OneOf;
use tracing::debug;

use crate::error::{DecodeError, IoError, ResourceNotFound};

/// Environment variable holding extra resource roots, searched first.
pub const RESOURCE_PATH_ENV: &str = "AUTUMN_RESOURCE_PATH";

/// Resolves resource names against an ordered list of root directories.
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    search_paths: Vec<Utf8PathBuf>,
}

impl Default for ResourceLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLoader {
    /// Search `$AUTUMN_RESOURCE_PATH`, then `./resources` and `.`, then the
    /// same two locations next to the running executable.
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(extra) = env::var_os(RESOURCE_PATH_ENV) {
            search_paths.extend(
                env::split_paths(&extra)
                    .filter(|p| !p.as_os_str().is_empty())
                    .filter_map(|p| Utf8PathBuf::from_path_buf(p).ok()),
            );
        }

        search_paths.push(Utf8PathBuf::from("resources"));
        search_paths.push(Utf8PathBuf::from("."));

        if let Some(exe_dir) = executable_dir() {
            search_paths.push(exe_dir.join("resources"));
            search_paths.push(exe_dir);
        }

        Self { search_paths }
    }

    pub fn with_search_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            search_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push_search_path(&mut self, path: impl Into<Utf8PathBuf>) {
        self.search_paths.push(path.into());
    }

    pub fn search_paths(&self) -> &[Utf8PathBuf] {
        &self.search_paths
    }

    /// First root containing a file called `name`.
    pub fn locate(&self, name: &str) -> Option<Utf8PathBuf> {
        self.search_paths
            .iter()
            .map(|root| root.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Read a resource as UTF-8 text, returning where it was found.
    pub fn read_to_string(
        &self,
        name: &str,
    ) -> Result<(Utf8PathBuf, String), OneOf<(ResourceNotFound, IoError, DecodeError)>> {
        let Some(path) = self.locate(name) else {
            return Err(OneOf::new(ResourceNotFound {
                name: name.to_string(),
                searched: self.search_paths.clone(),
            }));
        };
        debug!(resource = name, path = %path, "resolved resource");

        let bytes = fs::read(&path).map_err(|e| OneOf::new(IoError(e)))?;
        let text = String::from_utf8(bytes).map_err(|e| OneOf::new(DecodeError::InvalidUtf8(e.utf8_error())))?;

        Ok((path, text))
    }
}

fn executable_dir() -> Option<Utf8PathBuf> {
    let exe = env::current_exe().ok()?;
    exe.parent()
        .and_then(|dir| Utf8Path::from_path(dir))
        .map(Utf8Path::to_path_buf)
}
