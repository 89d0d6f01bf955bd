//! The persisted database document
//!
//! On disk the document keeps the shape older herokron releases wrote:
//!
//! ```json
//! {
//!   "keys": [{ "<36 character API key>": ["app-one", "app-two"] }],
//!   "color": 7762880,
//!   "webhook": { "id": "123", "token": "abc" }
//! }
//! ```
//!
//! Loading checks that the root and `webhook` are JSON objects (derived serde
//! structs would also take arrays), then does a typed deserialization followed
//! by [`Document::validate`].
//! Anything that fails either step is a [`SchemaViolation`]; the store answers
//! those by writing a fresh [`Document::default`].

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::color::{DEFAULT_COLOR, MAX_COLOR};
use crate::webhook::Webhook;

/// Every Heroku API key is a 36 character UUID
pub const KEY_LENGTH: usize = 36;

/// Reasons a loaded document is rejected
#[derive(Error, Debug)]
pub enum SchemaViolation {
    #[error("unreadable document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("`{0}` is not an object")]
    NotAnObject(&'static str),

    #[error("key #{index} is {length} characters long, expected 36")]
    KeyLength { index: usize, length: usize },

    #[error("key #{index} is registered more than once")]
    DuplicateKey { index: usize },

    #[error("color {0} is out of range")]
    ColorOutOfRange(u32),

    #[error("webhook has only one of `id` and `token`")]
    IncompleteWebhook,
}

/// One API key and the apps it owns
///
/// Serialized as a single-entry object `{ key: [apps] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub key: String,
    pub apps: Vec<String>,
}

impl RegistryEntry {
    pub fn new(key: impl Into<String>, apps: Vec<String>) -> Self {
        Self {
            key: key.into(),
            apps,
        }
    }
}

impl Serialize for RegistryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.apps)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegistryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = RegistryEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object holding exactly one API key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RegistryEntry, A::Error> {
                let (key, apps) = map
                    .next_entry::<String, Vec<String>>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if map.next_key::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(RegistryEntry { key, apps })
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

/// The whole database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// Registry entries in insertion order
    #[serde(rename = "keys")]
    pub registry: Vec<RegistryEntry>,
    pub color: u32,
    pub webhook: Webhook,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            registry: Vec::new(),
            color: DEFAULT_COLOR,
            webhook: Webhook::default(),
        }
    }
}

impl Document {
    /// Parse and validate a document
    pub fn from_json(content: impl AsRef<[u8]>) -> Result<Self, SchemaViolation> {
        let value: serde_json::Value = serde_json::from_slice(content.as_ref())?;
        if !value.is_object() {
            return Err(SchemaViolation::NotAnObject("document"));
        }
        if let Some(webhook) = value.get("webhook") {
            if !webhook.is_object() {
                return Err(SchemaViolation::NotAnObject("webhook"));
            }
        }

        let document: Document = serde_json::from_value(value)?;
        document.validate()?;
        Ok(document)
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        let mut seen = HashSet::new();
        for (index, entry) in self.registry.iter().enumerate() {
            let length = entry.key.chars().count();
            if length != KEY_LENGTH {
                return Err(SchemaViolation::KeyLength { index, length });
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(SchemaViolation::DuplicateKey { index });
            }
        }

        if self.color > MAX_COLOR {
            return Err(SchemaViolation::ColorOutOfRange(self.color));
        }

        if !self.webhook.is_empty() && !self.webhook.is_complete() {
            return Err(SchemaViolation::IncompleteWebhook);
        }

        Ok(())
    }

    /// All API keys, in registry order
    pub fn keys(&self) -> Vec<&str> {
        self.registry.iter().map(|e| e.key.as_str()).collect()
    }

    /// Every app across every key; duplicates between keys are kept
    pub fn apps(&self) -> Vec<&str> {
        self.registry
            .iter()
            .flat_map(|e| e.apps.iter().map(String::as_str))
            .collect()
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.registry.iter().position(|e| e.key == key)
    }

    pub fn apps_for(&self, key: &str) -> Option<&[String]> {
        self.registry
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.apps.as_slice())
    }

    /// First key, in registry order, whose apps include `app`
    pub fn key_for(&self, app: &str) -> Option<&str> {
        self.registry
            .iter()
            .find(|e| e.apps.iter().any(|a| a == app))
            .map(|e| e.key.as_str())
    }
}
