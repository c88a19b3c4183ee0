use std::sync::OnceLock;

use camino::{Utf8Path, Utf8PathBuf};
use terrors::OneOf;
use tracing::{debug, error, info};

use crate::RESOURCE_NAME;
use crate::error::{DecodeError, IoError, ResourceNotFound};
use crate::properties::Properties;
use crate::resource::ResourceLoader;

/// The application's default configuration, loaded from `autumn.properties`.
///
/// Lookups trim the key and the value, and treat a blank value the same as
/// a missing key.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    props: Properties,
    source: Option<Utf8PathBuf>,
}

impl ConfigStore {
    /// Load `autumn.properties` through `loader`, best effort.
    ///
    /// Failures are logged and leave the store empty, or holding whatever
    /// was parsed before a malformed line.
    pub fn initialize(loader: &ResourceLoader) -> Self {
        let mut store = Self::default();
        if let Err(e) = store.load_resource(loader, RESOURCE_NAME) {
            error!(resource = RESOURCE_NAME, "failed to load configuration: {e}");
        }
        store
    }

    /// Like [`ConfigStore::initialize`], but reports the failure.
    pub fn try_initialize(
        loader: &ResourceLoader,
    ) -> Result<Self, OneOf<(ResourceNotFound, IoError, DecodeError)>> {
        let mut store = Self::default();
        store.load_resource(loader, RESOURCE_NAME)?;
        Ok(store)
    }

    /// Process-wide store, initialized on first use with the default loader.
    pub fn global() -> &'static ConfigStore {
        static STORE: OnceLock<ConfigStore> = OnceLock::new();
        STORE.get_or_init(|| ConfigStore::initialize(&ResourceLoader::default()))
    }

    pub fn from_properties(props: Properties) -> Self {
        Self { props, source: None }
    }

    fn load_resource(
        &mut self,
        loader: &ResourceLoader,
        name: &str,
    ) -> Result<(), OneOf<(ResourceNotFound, IoError, DecodeError)>> {
        let (path, text) = loader.read_to_string(name)?;
        self.source = Some(path);
        self.props.load_str(&text).map_err(OneOf::broaden)?;
        debug!(resource = name, entries = self.props.len(), "loaded configuration");
        Ok(())
    }

    /// Look up a non-blank value.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = self.lookup(key);
        if value.is_none() {
            info!(key = key.trim(), "no value configured");
        }
        value
    }

    /// Look up a non-blank value, falling back to `default` (trimmed).
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(default.trim())
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.props
            .get(key.trim())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn properties(&self) -> &Properties {
        &self.props
    }

    /// Where the configuration was read from, if a resource was found.
    pub fn source(&self) -> Option<&Utf8Path> {
        self.source.as_deref()
    }
}
