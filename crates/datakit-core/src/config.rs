//! Configuration: file/environment settings and the runtime registries
//!
//! [`DataSettings`] holds the plain settings (global wrap key, date format)
//! and is loaded from JSON/YAML files and environment variables.
//! [`DataConfig`] adds the transformer, cast and normalizer registries and
//! the cache of data class descriptors consulted by the engine.
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::resolvers::{ArrayNormalizer, Cast, DateTimeCast, JsonNormalizer, Normalizer, ObjectNormalizer};
use crate::support::{DataClass, DataProperty};
use crate::transformation::{ArrayableTransformer, DateTimeTransformer, EnumTransformer, Transformer};
use crate::value::{Value, ValueKind};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, warn};

/// Names the settings file loaded by [`DataSettings::load`]
pub const CONFIG_PATH_VAR: &str = "DATAKIT_CONFIG";
/// Overrides [`DataSettings::wrap`]
pub const WRAP_VAR: &str = "DATAKIT_WRAP";
/// Overrides [`DataSettings::date_format`]
pub const DATE_FORMAT_VAR: &str = "DATAKIT_DATE_FORMAT";

/// ATOM, e.g. `2024-02-29T10:00:00+01:00`
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Plain settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Key every data object and collection wraps under unless told otherwise
    pub wrap: Option<String>,
    /// chrono format used to output and parse date-times
    pub date_format: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            wrap: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DataSettings {
    /// Load settings from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(Error::configuration(format!(
                "unsupported settings file `{}`, expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }

    /// Apply overrides from the process environment
    pub fn merge_with_env(self) -> Self {
        self.merge_with_vars(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn merge_with_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(wrap) = lookup(WRAP_VAR) {
            self.wrap = (!wrap.is_empty()).then_some(wrap);
        }
        if let Some(format) = lookup(DATE_FORMAT_VAR).filter(|format| !format.is_empty()) {
            self.date_format = format;
        }
        self
    }

    /// The file named by `DATAKIT_CONFIG` (defaults when unset), then
    /// environment overrides
    pub fn load() -> Result<Self> {
        let settings = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(settings.merge_with_env())
    }
}

/// Settings plus the registries consulted while building and transforming data
pub struct DataConfig {
    settings: DataSettings,
    transformers: HashMap<ValueKind, Arc<dyn Transformer>>,
    casts: HashMap<ValueKind, Arc<dyn Cast>>,
    normalizers: Vec<Arc<dyn Normalizer>>,
    classes: RwLock<HashMap<String, Arc<DataClass>>>,
}

static GLOBAL: OnceLock<DataConfig> = OnceLock::new();

impl DataConfig {
    /// Configuration with the built-in transformers, casts and normalizers
    pub fn new(settings: DataSettings) -> Self {
        let mut transformers: HashMap<ValueKind, Arc<dyn Transformer>> = HashMap::new();
        transformers.insert(ValueKind::DateTime, Arc::new(DateTimeTransformer::new()));
        transformers.insert(ValueKind::Enum, Arc::new(EnumTransformer));
        transformers.insert(ValueKind::Data, Arc::new(ArrayableTransformer));
        transformers.insert(ValueKind::Collection, Arc::new(ArrayableTransformer));

        let mut casts: HashMap<ValueKind, Arc<dyn Cast>> = HashMap::new();
        casts.insert(ValueKind::DateTime, Arc::new(DateTimeCast::new()));

        let normalizers: Vec<Arc<dyn Normalizer>> = vec![
            Arc::new(ArrayNormalizer),
            Arc::new(ObjectNormalizer),
            Arc::new(JsonNormalizer),
        ];

        Self {
            settings,
            transformers,
            casts,
            normalizers,
            classes: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide configuration, loaded from the environment on first use
    pub fn global() -> &'static DataConfig {
        GLOBAL.get_or_init(|| match DataSettings::load() {
            Ok(settings) => DataConfig::new(settings),
            Err(err) => {
                warn!(error = %err, "failed to load data settings, using defaults");
                DataConfig::default()
            }
        })
    }

    pub fn settings(&self) -> &DataSettings {
        &self.settings
    }

    /// Register the global transformer for values of `kind`
    pub fn with_transformer(mut self, kind: ValueKind, transformer: impl Transformer + 'static) -> Self {
        self.transformers.insert(kind, Arc::new(transformer));
        self
    }

    /// Register the global cast for properties of `kind`
    pub fn with_cast(mut self, kind: ValueKind, cast: impl Cast + 'static) -> Self {
        self.casts.insert(kind, Arc::new(cast));
        self
    }

    /// Register a normalizer, tried before the ones already registered
    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizers.insert(0, Arc::new(normalizer));
        self
    }

    pub fn find_global_transformer_for_value(&self, value: &Value) -> Option<&Arc<dyn Transformer>> {
        self.transformers.get(&value.kind())
    }

    pub fn find_global_cast(&self, property: &DataProperty) -> Option<&Arc<dyn Cast>> {
        property
            .ty()
            .value_kind()
            .and_then(|kind| self.casts.get(&kind))
    }

    pub fn normalizers(&self) -> &[Arc<dyn Normalizer>] {
        &self.normalizers
    }

    /// Add `class` to the descriptor cache, replacing any class of that name
    pub fn register_class(&self, class: Arc<DataClass>) {
        debug!(class = class.name(), properties = class.properties().len(), "registering data class");
        self.classes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class.name().to_string(), class);
    }

    pub fn data_class(&self, name: &str) -> Result<Arc<DataClass>> {
        self.classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownDataClass {
                name: name.to_string(),
            })
    }

    /// Cached class `name`, built with `build` on first access
    ///
    /// `build` runs at most once per name, even under concurrent access.
    pub fn data_class_or_insert_with<F>(&self, name: &str, build: F) -> Result<Arc<DataClass>>
    where
        F: FnOnce() -> Result<Arc<DataClass>>,
    {
        if let Some(class) = self
            .classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(Arc::clone(class));
        }

        let mut classes = self.classes.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(class) = classes.get(name) {
            return Ok(Arc::clone(class));
        }

        let class = build()?;
        debug!(class = name, properties = class.properties().len(), "building data class");
        classes.insert(name.to_string(), Arc::clone(&class));
        Ok(class)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new(DataSettings::default())
    }
}

impl fmt::Debug for DataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let classes: Vec<String> = self
            .classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();

        f.debug_struct("DataConfig")
            .field("settings", &self.settings)
            .field("transformers", &self.transformers)
            .field("casts", &self.casts)
            .field("normalizers", &self.normalizers)
            .field("classes", &classes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::PropertyType;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::Builder;

    fn song_class() -> Result<Arc<DataClass>> {
        DataClass::builder("Song")
            .property(DataProperty::new("title", PropertyType::String))
            .build()
    }

    #[test]
    fn test_settings_from_yaml_and_json() {
        let mut yaml = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(yaml, "wrap: data").unwrap();
        let settings = DataSettings::from_file(yaml.path()).unwrap();
        assert_eq!(settings.wrap.as_deref(), Some("data"));
        assert_eq!(settings.date_format, DEFAULT_DATE_FORMAT);

        let mut json = Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"date_format": "%Y-%m-%d"}}"#).unwrap();
        let settings = DataSettings::from_file(json.path()).unwrap();
        assert_eq!(settings.wrap, None);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_settings_rejects_unknown_extension() {
        let file = Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            DataSettings::from_file(file.path()),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_settings_malformed_file() {
        let mut json = Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, "{{ not json").unwrap();
        assert!(matches!(DataSettings::from_file(json.path()), Err(Error::Json { .. })));
    }

    #[test]
    fn test_variable_overrides() {
        let vars = HashMap::from([
            (WRAP_VAR, "items".to_string()),
            (DATE_FORMAT_VAR, "%d.%m.%Y".to_string()),
        ]);
        let settings = DataSettings::default().merge_with_vars(|name| vars.get(name).cloned());
        assert_eq!(settings.wrap.as_deref(), Some("items"));
        assert_eq!(settings.date_format, "%d.%m.%Y");

        let cleared = settings.merge_with_vars(|name| (name == WRAP_VAR).then(String::new));
        assert_eq!(cleared.wrap, None);
        assert_eq!(cleared.date_format, "%d.%m.%Y");
    }

    #[test]
    fn test_default_registries() {
        let config = DataConfig::default();
        assert!(config.find_global_transformer_for_value(&Value::from("x")).is_none());
        assert!(config
            .find_global_transformer_for_value(&Value::from(crate::value::EnumValue::pure("A")))
            .is_some());

        let date = DataProperty::new("at", PropertyType::DateTime);
        let mixed = DataProperty::new("meta", PropertyType::Mixed);
        assert!(config.find_global_cast(&date).is_some());
        assert!(config.find_global_cast(&mixed).is_none());
        assert_eq!(config.normalizers().len(), 3);
    }

    #[test]
    fn test_class_cache_builds_once() {
        let config = DataConfig::default();
        let builds = AtomicUsize::new(0);
        let build = || {
            builds.fetch_add(1, Ordering::SeqCst);
            song_class()
        };

        let first = config.data_class_or_insert_with("Song", build).unwrap();
        let second = config.data_class_or_insert_with("Song", build).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&config.data_class("Song").unwrap(), &first));
    }

    #[test]
    fn test_unknown_class() {
        let config = DataConfig::default();
        assert!(matches!(
            config.data_class("Missing"),
            Err(Error::UnknownDataClass { .. })
        ));

        config.register_class(song_class().unwrap());
        assert_eq!(config.data_class("Song").unwrap().name(), "Song");
    }
}
