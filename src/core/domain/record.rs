//! Sealed record.
//!
//! The plain data structure handed to whatever renders the manifest. Field
//! names serialize the way the SealedSecret resource expects them.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Serializer};

use crate::core::constants::{API_VERSION, KIND};
use crate::core::types::{AnnotationSet, SecretKey};

/// One encrypted value. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedValue(Vec<u8>);

impl SealedValue {
    pub fn new(blob: Vec<u8>) -> Self {
        Self(blob)
    }

    /// Raw blob bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Standard padded base64, as embedded in the manifest.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl Serialize for SealedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

/// Object metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: AnnotationSet,
}

/// Metadata the controller applies to the unsealed secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedSpec {
    pub encrypted_data: BTreeMap<SecretKey, SealedValue>,
    pub template: Template,
}

/// A complete sealing result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedRecord {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: SealedSpec,
}

impl SealedRecord {
    /// Assemble a record.
    ///
    /// `annotations` go on the record itself; `scope_annotations` also go on
    /// the template so the unsealed secret keeps its scope marker.
    pub fn new(
        name: &str,
        namespace: &str,
        annotations: AnnotationSet,
        scope_annotations: AnnotationSet,
        encrypted_data: BTreeMap<SecretKey, SealedValue>,
    ) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: Metadata {
                name: name.to_string(),
                namespace: namespace.to_string(),
                annotations,
            },
            spec: SealedSpec {
                encrypted_data,
                template: Template {
                    metadata: Metadata {
                        name: name.to_string(),
                        namespace: namespace.to_string(),
                        annotations: scope_annotations,
                    },
                },
            },
        }
    }

    pub fn encrypted_data(&self) -> &BTreeMap<SecretKey, SealedValue> {
        &self.spec.encrypted_data
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.metadata.annotations
    }
}
