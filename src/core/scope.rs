//! Scope resolution.
//!
//! A scope decides how far a sealed value may travel: anywhere in the
//! cluster, anywhere in one namespace, or only into one named secret. The
//! scope is enforced by the label mixed into both encryption steps, and
//! advertised to the controller through a marker annotation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    CLUSTER_WIDE_ANNOTATION, NAMESPACE_WIDE_ANNOTATION, SCOPE_ANNOTATIONS,
};
use crate::core::types::AnnotationSet;
use crate::error::ValidationError;

/// Breadth of the decryption context a value is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Cluster,
    Namespace,
    #[default]
    Strict,
}

impl Scope {
    /// Binding label for a secret under this scope.
    pub fn label(&self, namespace: &str, secret_name: &str) -> Label {
        match self {
            Self::Cluster => Label(String::new()),
            Self::Namespace => Label(namespace.to_string()),
            Self::Strict => Label(format!("{}/{}", namespace, secret_name)),
        }
    }

    /// Marker annotations advertising this scope. Strict has none.
    pub fn annotations(&self) -> AnnotationSet {
        let mut annotations = AnnotationSet::new();
        match self {
            Self::Cluster => {
                annotations.insert(CLUSTER_WIDE_ANNOTATION.to_string(), "true".to_string());
            }
            Self::Namespace => {
                annotations.insert(NAMESPACE_WIDE_ANNOTATION.to_string(), "true".to_string());
            }
            Self::Strict => {}
        }
        annotations
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::Namespace => "namespace",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cluster" => Ok(Self::Cluster),
            "namespace" => Ok(Self::Namespace),
            "strict" => Ok(Self::Strict),
            _ => Err(ValidationError::UnknownScope(s.to_string())),
        }
    }
}

/// Binding context mixed into key wrapping and payload sealing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the binding label for `(scope, namespace, secret_name)`.
pub fn resolve_label(scope: Scope, namespace: &str, secret_name: &str) -> Label {
    scope.label(namespace, secret_name)
}

/// Resolve the marker annotations for `scope`.
pub fn resolve_annotations(scope: Scope) -> AnnotationSet {
    scope.annotations()
}

/// Whether `key` is one of the reserved scope markers.
pub fn is_scope_annotation(key: &str) -> bool {
    SCOPE_ANNOTATIONS.contains(&key)
}
