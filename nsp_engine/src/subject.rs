//! # Subject Contract and Accessor Registry
//!
//! The subject is the external system under validation. The orchestrator
//! only ever talks to it through the [`Subject`] trait: named state
//! accessors returning value trees, plus a configuration-text fetch per
//! region. [`AccessorRegistry`] is the standard implementation, replacing
//! runtime "does this attribute exist" probing with an explicit capability
//! set populated once at construction time.

use crate::errors::ComplianceError;
use nsp_core::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Naming convention every state accessor must follow
pub const ACCESSOR_PREFIX: &str = "get_";

/// Configuration region whose literal text can be checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRegion {
    Running,
    Candidate,
}

impl ConfigRegion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Candidate => "candidate",
        }
    }
}

impl fmt::Display for ConfigRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfigRegion {
    type Err = ComplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "candidate" => Ok(Self::Candidate),
            other => Err(ComplianceError::UnsupportedRegion {
                region: other.to_string(),
            }),
        }
    }
}

/// Failure contract for subject-side operations
#[derive(Debug, thiserror::Error)]
pub enum AccessorError {
    /// The subject does not support this accessor at all
    #[error("accessor '{name}' is not implemented by this subject")]
    NotImplemented { name: String },

    /// The accessor exists but failed to produce the observed state
    #[error("accessor '{name}' failed: {reason}")]
    Failed { name: String, reason: String },
}

/// External system under validation, seen through its state accessors
pub trait Subject {
    /// Names of every accessor this subject supports
    fn accessor_names(&self) -> Vec<String>;

    /// Invoke a named accessor and return its observed state tree
    fn invoke(&self, name: &str) -> Result<Value, AccessorError>;

    /// Fetch the literal configuration lines for a region
    fn fetch_config(&self, region: ConfigRegion) -> Result<Vec<String>, AccessorError>;

    fn has_accessor(&self, name: &str) -> bool {
        self.accessor_names().iter().any(|n| n == name)
    }
}

/// Boxed state accessor producing one observed value tree
pub type AccessorFn = Box<dyn Fn() -> Result<Value, AccessorError> + Send + Sync>;

/// Boxed configuration fetch for a region
pub type ConfigFn = Box<dyn Fn(ConfigRegion) -> Result<Vec<String>, AccessorError> + Send + Sync>;

/// Errors raised while populating a registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("accessor name '{name}' must start with '{ACCESSOR_PREFIX}'")]
    InvalidName { name: String },

    #[error("accessor '{name}' is already registered")]
    Duplicate { name: String },
}

/// Explicit check-name to accessor map
///
/// Names are validated against the accessor prefix at registration, so the
/// capability set is known before any check runs. Registration order is
/// preserved for `accessor_names`.
pub struct AccessorRegistry {
    order: Vec<String>,
    accessors: HashMap<String, AccessorFn>,
    config_source: Option<ConfigFn>,
}

impl AccessorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }
}

impl Subject for AccessorRegistry {
    fn accessor_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn invoke(&self, name: &str) -> Result<Value, AccessorError> {
        match self.accessors.get(name) {
            Some(accessor) => accessor(),
            None => Err(AccessorError::NotImplemented {
                name: name.to_string(),
            }),
        }
    }

    fn fetch_config(&self, region: ConfigRegion) -> Result<Vec<String>, AccessorError> {
        match &self.config_source {
            Some(fetch) => fetch(region),
            None => Err(AccessorError::NotImplemented {
                name: "get_config".to_string(),
            }),
        }
    }

    fn has_accessor(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }
}

/// Builder populating a registry at subject-construction time
pub struct RegistryBuilder {
    order: Vec<String>,
    accessors: HashMap<String, AccessorFn>,
    config_source: Option<ConfigFn>,
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("order", &self.order)
            .field("config_source", &self.config_source.is_some())
            .finish_non_exhaustive()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            accessors: HashMap::new(),
            config_source: None,
        }
    }

    /// Register a state accessor under a `get_`-prefixed name
    pub fn with_accessor<F>(mut self, name: &str, accessor: F) -> Result<Self, RegistryError>
    where
        F: Fn() -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        if !name.starts_with(ACCESSOR_PREFIX) {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
            });
        }
        if self.accessors.contains_key(name) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
            });
        }

        self.order.push(name.to_string());
        self.accessors.insert(name.to_string(), Box::new(accessor));
        Ok(self)
    }

    /// Register the configuration-text source
    pub fn with_config_source<F>(mut self, fetch: F) -> Self
    where
        F: Fn(ConfigRegion) -> Result<Vec<String>, AccessorError> + Send + Sync + 'static,
    {
        self.config_source = Some(Box::new(fetch));
        self
    }

    pub fn build(self) -> AccessorRegistry {
        AccessorRegistry {
            order: self.order,
            accessors: self.accessors,
            config_source: self.config_source,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
