//! Config parameter descriptors (spec §3, §4.5a).

use serde::{Deserialize, Serialize};

/// The primitive kind a config parameter's value is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigParameterKind {
    String,
    Int,
    Bool,
    Double,
    Duration,
    Memorysize,
    Regexp,
}

impl ConfigParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigParameterKind::String => "string",
            ConfigParameterKind::Int => "int",
            ConfigParameterKind::Bool => "bool",
            ConfigParameterKind::Double => "double",
            ConfigParameterKind::Duration => "duration",
            ConfigParameterKind::Memorysize => "memorysize",
            ConfigParameterKind::Regexp => "regexp",
        }
    }
}

/// A single config parameter a streamlet class accepts (spec §3,
/// `ConfigParameterDescriptor`). Validated by the config-parameter
/// verification pass, §4.5a.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigParameterDescriptor {
    pub key: String,
    pub description: String,
    pub kind: ConfigParameterKind,
    pub pattern: Option<String>,
    pub default_value: Option<String>,
}

impl ConfigParameterDescriptor {
    pub fn new(key: impl Into<String>, kind: ConfigParameterKind) -> Self {
        ConfigParameterDescriptor {
            key: key.into(),
            description: String::new(),
            kind,
            pattern: None,
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}
