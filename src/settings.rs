//! Declarative start-up configuration.
//!
//! Value types are meant to be created once, during initialization. A
//! settings file lets that happen from configuration rather than code:
//!
//! ```toml
//! freeze = true
//!
//! [[enums]]
//! name = "bool"
//! labels = ["true", "false"]
//! complete = true
//!
//! [[times]]
//! name = "stamp"
//! format = "%Y-%m-%d %H:%M:%S"
//!
//! [[versions]]
//! name = "firmware"
//!
//! [[defaults]]
//! name = "one"
//! text = "1"
//! code = 1
//! ```

use std::collections::HashSet;
use std::path::Path;

// config lets you read a separate settings file
use config::{Config, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, TabsError};
use crate::registry::{self, Registry};
use crate::valuetype::{Code, TimeValueType};

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumSettings {
    pub name: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default = "yes")]
    pub void: bool,
    #[serde(default)]
    pub complete: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeSettings {
    pub name: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionSettings {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultSettings {
    pub name: String,
    pub text: String,
    pub code: Code,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub freeze: bool,
    #[serde(default)]
    pub enums: Vec<EnumSettings>,
    #[serde(default)]
    pub times: Vec<TimeSettings>,
    #[serde(default)]
    pub versions: Vec<VersionSettings>,
    #[serde(default)]
    pub defaults: Vec<DefaultSettings>,
}

impl Settings {
    /// Reads a settings file, the format follows from its extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
    fn names(&self) -> Vec<&str> {
        self.enums
            .iter()
            .map(|e| e.name.as_str())
            .chain(self.times.iter().map(|t| t.name.as_str()))
            .chain(self.versions.iter().map(|v| v.name.as_str()))
            .chain(self.defaults.iter().map(|d| d.name.as_str()))
            .collect()
    }
    // Everything that could go wrong is checked here, so populating
    // either registers all declared value types or none of them.
    fn preflight(&self, registry: &Registry) -> Result<()> {
        if registry.is_frozen() && !self.names().is_empty() {
            return Err(TabsError::Config("registry is already frozen".to_owned()));
        }
        let mut seen = HashSet::new();
        for name in self.names() {
            if name.is_empty() {
                return Err(TabsError::Config("value type without a name".to_owned()));
            }
            if !seen.insert(name) {
                return Err(TabsError::Config(format!("'{}' is declared twice", name)));
            }
            if registry.contains(name) {
                return Err(TabsError::Config(format!("'{}' is already registered", name)));
            }
        }
        for time in &self.times {
            TimeValueType::new(&time.name, &time.format)?;
        }
        for e in self.enums.iter().filter(|e| !e.void) {
            if e.labels.iter().any(String::is_empty) {
                return Err(TabsError::Config(format!(
                    "'{}' does not accept void but lists an empty label",
                    e.name
                )));
            }
        }
        Ok(())
    }
    /// Registers every declared value type, returning the names in declaration order.
    pub fn populate(&self, registry: &mut Registry) -> Result<Vec<String>> {
        self.preflight(registry)?;
        for e in &self.enums {
            let value_type = registry.enumeration(&e.name, e.void, e.labels.as_slice());
            if e.complete {
                value_type.complete();
            }
            debug!(value_type = %e.name, labels = value_type.len(), "declared enumeration");
        }
        for time in &self.times {
            registry.time(&time.name, &time.format)?;
            debug!(value_type = %time.name, format = %time.format, "declared time");
        }
        for version in &self.versions {
            registry.version(&version.name);
            debug!(value_type = %version.name, "declared version");
        }
        for default in &self.defaults {
            registry.default_type(&default.name, &default.text, default.code);
            debug!(value_type = %default.name, code = default.code, "declared default");
        }
        if self.freeze {
            registry.freeze();
        }
        Ok(self.names().into_iter().map(str::to_owned).collect())
    }
    pub fn populate_global(&self) -> Result<Vec<String>> {
        self.populate(&mut registry::global_mut())
    }
}
