//! Localized text overrides.
//!
//! Translations live in ordinary nested i18n documents. A record's text is
//! looked up under `testimonials.customers.<id>.<field>`; anything missing
//! falls back to the text stored on the record itself.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::TestimonialRecord;

const KEY_PREFIX: &str = "testimonials.customers";

/// Overridable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteField {
    Quote,
    ShortQuote,
}

impl QuoteField {
    pub fn key_segment(&self) -> &'static str {
        match self {
            QuoteField::Quote => "quote",
            QuoteField::ShortQuote => "shortQuote",
        }
    }
}

/// Flattened translation table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOverrides {
    entries: HashMap<String, String>,
}

impl TextOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a nested i18n JSON object into dotted keys.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::InvalidOverrides("top level must be an object".into()));
        }
        let mut overrides = Self::new();
        flatten("", &value, &mut overrides.entries);
        Ok(overrides)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key_for(id: &str, field: QuoteField) -> String {
        format!("{}.{}.{}", KEY_PREFIX, id, field.key_segment())
    }

    /// Text for `field` of the record with `id`, or `fallback`.
    pub fn resolve<'a>(&'a self, id: &str, field: QuoteField, fallback: &'a str) -> &'a str {
        self.entries
            .get(&Self::key_for(id, field))
            .map(String::as_str)
            .unwrap_or(fallback)
    }

    pub fn quote<'a>(&'a self, record: &'a TestimonialRecord) -> &'a str {
        self.resolve(&record.id, QuoteField::Quote, &record.quote)
    }

    pub fn short_quote<'a>(&'a self, record: &'a TestimonialRecord) -> &'a str {
        self.resolve(&record.id, QuoteField::ShortQuote, &record.short_quote)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        // Plural arrays, numbers and nulls carry no testimonial text
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "testimonials": {
            "customers": {
                "paul": { "quote": "Servicio A+", "shortQuote": "¡A+!" },
                "steph": { "shortQuote": "Gran equipo" }
            },
            "wallOfLove": { "title": "Muro de amor" }
        }
    }"#;

    #[test]
    fn nested_document_flattens() {
        let overrides = TextOverrides::from_json(DOC).unwrap();
        assert_eq!(overrides.len(), 4);
        assert_eq!(
            overrides.resolve("paul", QuoteField::Quote, "fallback"),
            "Servicio A+"
        );
    }

    #[test]
    fn missing_key_falls_back() {
        let overrides = TextOverrides::from_json(DOC).unwrap();
        assert_eq!(overrides.resolve("steph", QuoteField::Quote, "original"), "original");
        assert_eq!(overrides.resolve("nobody", QuoteField::ShortQuote, "orig"), "orig");
        assert_eq!(overrides.resolve("steph", QuoteField::ShortQuote, "orig"), "Gran equipo");
    }

    #[test]
    fn key_format() {
        assert_eq!(
            TextOverrides::key_for("holly-baer", QuoteField::ShortQuote),
            "testimonials.customers.holly-baer.shortQuote"
        );
    }

    #[test]
    fn rejects_non_object() {
        let err = TextOverrides::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::InvalidOverrides(_)));
    }

    #[test]
    fn record_helpers() {
        let record: TestimonialRecord = serde_json::from_value(serde_json::json!({
            "id": "paul",
            "name": "Paul",
            "ownerImage": "/p.png",
            "quote": "A+ customer service",
            "shortQuote": "A+!"
        }))
        .unwrap();

        let empty = TextOverrides::new();
        assert_eq!(empty.short_quote(&record), "A+!");

        let overrides = TextOverrides::from_json(DOC).unwrap();
        assert_eq!(overrides.short_quote(&record), "¡A+!");
        assert_eq!(overrides.quote(&record), "Servicio A+");
    }
}
