//! Stored shoe record and its identifier

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::input::ShoeFields;

/// Identifier token is not a well-formed shoe id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid shoe id: {0:?}")]
pub struct InvalidShoeId(pub String);

/// Opaque unique identifier of a stored shoe.
///
/// Assigned by the store at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoeId(Uuid);

impl ShoeId {
    /// Draw a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a path token, rejecting anything that is not a well-formed id
    pub fn parse(token: &str) -> Result<Self, InvalidShoeId> {
        Uuid::parse_str(token)
            .map(Self)
            .map_err(|_| InvalidShoeId(token.to_string()))
    }

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl FromStr for ShoeId {
    type Err = InvalidShoeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ShoeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A stored shoe.
///
/// Optional attributes that were not provided are omitted from the
/// serialized document rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shoe {
    pub id: ShoeId,
    pub style_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heel_height: Option<f64>,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capsule_collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_shoe: Option<String>,
    pub material: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shoe {
    /// Build a freshly created record; both timestamps are `now`
    pub fn new(id: ShoeId, fields: ShoeFields, now: DateTime<Utc>) -> Self {
        let ShoeFields {
            style_name,
            heel_height,
            color,
            color_code,
            quote,
            season,
            year,
            capsule_collection,
            retail_price,
            base_shoe,
            material,
            description,
            tags,
        } = fields;

        Self {
            id,
            style_name,
            heel_height,
            color,
            color_code,
            quote,
            season,
            year,
            capsule_collection,
            retail_price,
            base_shoe,
            material,
            description,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable attribute with `fields`.
    ///
    /// This is a whole-record replace: an optional attribute missing from
    /// `fields` is cleared. Identity and timestamps are kept.
    pub fn replace(&mut self, fields: ShoeFields) {
        let (id, created_at, updated_at) = (self.id, self.created_at, self.updated_at);
        *self = Self::new(id, fields, created_at);
        self.updated_at = updated_at;
    }

    /// Refresh `updated_at`; it never moves before `created_at`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}
