//! Testimonial record model.
//!
//! Records are plain immutable data. The serialized form uses camelCase
//! field names so catalogs exported from the website load unchanged.

use serde::{Deserialize, Deserializer, Serialize};

use crate::placeholder;

/// A single customer testimonial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialRecord {
    /// Stable identifier, unique within a collection
    pub id: String,

    /// Display name of the customer
    #[serde(default)]
    pub name: String,

    /// Company name (may be empty)
    #[serde(default)]
    pub company: String,

    /// Role at the company (may be empty)
    #[serde(default)]
    pub role: String,

    /// Company website
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Full testimonial text
    #[serde(default)]
    pub quote: String,

    /// Truncated testimonial text for cards
    #[serde(default)]
    pub short_quote: String,

    /// Provenance note, e.g. "7 months ago"
    #[serde(default)]
    pub extra_info: String,

    /// Portrait of the customer
    pub owner_image: String,

    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,

    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub brand_logo: Option<String>,

    /// Product shot shown next to the carousel
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub pouch_image: Option<String>,

    /// Pre-assigned visual category token
    #[serde(default)]
    pub bg_color: String,

    /// External video reference
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

/// Image slots a record can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSlot {
    Owner,
    CompanyLogo,
    BrandLogo,
    Pouch,
}

impl TestimonialRecord {
    /// Whether the record carries a playable video.
    pub fn has_video(&self) -> bool {
        self.video_id.is_some()
    }

    /// "Role, Company", "Role", "Company" or nothing.
    pub fn byline(&self) -> Option<String> {
        match (self.role.is_empty(), self.company.is_empty()) {
            (true, true) => None,
            (false, true) => Some(self.role.clone()),
            (true, false) => Some(self.company.clone()),
            (false, false) => Some(format!("{}, {}", self.role, self.company)),
        }
    }

    /// The configured URL for an image slot, if any.
    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        match slot {
            ImageSlot::Owner => Some(self.owner_image.as_str()),
            ImageSlot::CompanyLogo => self.company_logo.as_deref(),
            ImageSlot::BrandLogo => self.brand_logo.as_deref(),
            ImageSlot::Pouch => self.pouch_image.as_deref(),
        }
    }

    /// Deterministic placeholder to swap in when the slot's image fails to load.
    pub fn fallback_image(&self, slot: ImageSlot) -> String {
        match slot {
            ImageSlot::Owner | ImageSlot::Pouch => placeholder::avatar_url(&self.name),
            ImageSlot::CompanyLogo | ImageSlot::BrandLogo => placeholder::logo_url(&self.company),
        }
    }

    /// Resolve a slot given whether loading its URL failed.
    pub fn resolve_image(&self, slot: ImageSlot, load_failed: bool) -> String {
        match self.image(slot) {
            Some(url) if !load_failed => url.to_string(),
            _ => self.fallback_image(slot),
        }
    }
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
