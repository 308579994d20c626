//! Ordered, immutable testimonial collection.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::TestimonialRecord;

/// Catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../data/testimonials.json");

/// An ordered list of testimonials. Rotation order is array order.
///
/// Construction validates that every id is non-empty and unique; after that
/// the collection never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestimonialCollection {
    records: Vec<TestimonialRecord>,
}

impl TestimonialCollection {
    /// Build a collection, rejecting blank or duplicate ids.
    pub fn new(records: Vec<TestimonialRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(Error::EmptyId(position));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(Error::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<TestimonialRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Load a JSON catalog from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let collection = Self::from_json(&json)?;
        debug!(path = %path.display(), count = collection.len(), "loaded testimonial catalog");
        Ok(collection)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TestimonialRecord> {
        self.records.get(index)
    }

    /// Find a record and its position by id.
    pub fn find(&self, id: &str) -> Option<(usize, &TestimonialRecord)> {
        self.records.iter().enumerate().find(|(_, r)| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestimonialRecord> {
        self.records.iter()
    }

    /// Records that carry a video, in rotation order.
    pub fn with_video(&self) -> impl Iterator<Item = (usize, &TestimonialRecord)> {
        self.records.iter().enumerate().filter(|(_, r)| r.has_video())
    }

    pub fn as_slice(&self) -> &[TestimonialRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(id: &str) -> TestimonialRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": id.to_uppercase(),
            "ownerImage": format!("/imgs/{id}.png"),
        }))
        .unwrap()
    }

    #[test]
    fn builtin_catalog_loads() {
        let collection = TestimonialCollection::builtin().unwrap();
        assert_eq!(collection.len(), 13);
        assert_eq!(collection.get(0).unwrap().id, "michelle-correa");
        assert_eq!(collection.get(12).unwrap().id, "cheryl");
    }

    #[test]
    fn preserves_order() {
        let collection =
            TestimonialCollection::new(vec![record("b"), record("a"), record("c")]).unwrap();
        let ids: Vec<_> = collection.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = TestimonialCollection::new(vec![record("a"), record("b"), record("a")])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn rejects_blank_ids() {
        let err = TestimonialCollection::new(vec![record("a"), record(" ")]).unwrap_err();
        assert!(matches!(err, Error::EmptyId(1)));
    }

    #[test]
    fn find_returns_position() {
        let collection =
            TestimonialCollection::new(vec![record("a"), record("b"), record("c")]).unwrap();
        let (position, found) = collection.find("c").unwrap();
        assert_eq!(position, 2);
        assert_eq!(found.name, "C");
        assert!(collection.find("zzz").is_none());
    }

    #[test]
    fn with_video_filters() {
        let mut with_video = record("b");
        with_video.video_id = Some("yt123".into());
        let collection =
            TestimonialCollection::new(vec![record("a"), with_video, record("c")]).unwrap();
        let found: Vec<_> = collection.with_video().map(|(i, _)| i).collect();
        assert_eq!(found, [1]);
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = TestimonialCollection::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"x","name":"X","ownerImage":"/x.png"}},{{"id":"y","name":"Y","ownerImage":"/y.png"}}]"#
        )
        .unwrap();

        let collection = TestimonialCollection::from_path(file.path()).unwrap();
        assert_eq!(collection.len(), 2);

        let missing = TestimonialCollection::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }

    #[test]
    fn empty_collection_is_valid() {
        let collection = TestimonialCollection::from_json("[]").unwrap();
        assert!(collection.is_empty());
    }
}
