//! Candidate and confirmed shoe input
//!
//! Everything is optional at the HTTP boundary. `ShoeInput::validate`
//! checks the required attributes in a fixed order and reports the first
//! one that is missing.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use thiserror::Error;

/// A required attribute absent from create/update input.
///
/// Variants are declared in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingField {
    #[error("Shoe must have a style name")]
    StyleName,
    #[error("Shoe must have color")]
    Color,
    #[error("Shoe must have a year")]
    Year,
    #[error("Shoe must have material")]
    Material,
    #[error("Shoe must have description")]
    Description,
    #[error("Shoe must have tags")]
    Tags,
}

/// Request body for create and update. `null` deserializes as absent;
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoeInput {
    pub style_name: Option<String>,
    pub heel_height: Option<f64>,
    pub color: Option<String>,
    pub color_code: Option<String>,
    pub quote: Option<String>,
    pub season: Option<String>,
    #[serde(default, deserialize_with = "whole_year")]
    pub year: Option<i32>,
    pub capsule_collection: Option<String>,
    pub retail_price: Option<f64>,
    pub base_shoe: Option<String>,
    pub material: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Input whose required attributes are all present
#[derive(Debug, Clone, PartialEq)]
pub struct ShoeFields {
    pub style_name: String,
    pub heel_height: Option<f64>,
    pub color: String,
    pub color_code: Option<String>,
    pub quote: Option<String>,
    pub season: Option<String>,
    pub year: i32,
    pub capsule_collection: Option<String>,
    pub retail_price: Option<f64>,
    pub base_shoe: Option<String>,
    pub material: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Any JSON number with no fractional part, so `2020.0` reads as 2020
fn whole_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(n) if n.fract() == 0.0 && n >= i32::MIN as f64 && n <= i32::MAX as f64 => {
            Ok(Some(n as i32))
        }
        Some(n) => Err(de::Error::custom(format!(
            "year must be a whole number, got {}",
            n
        ))),
    }
}

/// Empty text counts as missing
fn present_text(value: Option<String>, field: MissingField) -> Result<String, MissingField> {
    value.filter(|s| !s.is_empty()).ok_or(field)
}

impl ShoeInput {
    /// Confirm the required attributes.
    ///
    /// Order: styleName, color, year, material, description, tags. A zero
    /// year counts as missing. An empty tag list is accepted; only an
    /// absent one is rejected.
    pub fn validate(self) -> Result<ShoeFields, MissingField> {
        let style_name = present_text(self.style_name, MissingField::StyleName)?;
        let color = present_text(self.color, MissingField::Color)?;
        let year = self.year.filter(|y| *y != 0).ok_or(MissingField::Year)?;
        let material = present_text(self.material, MissingField::Material)?;
        let description = present_text(self.description, MissingField::Description)?;
        let tags = self.tags.ok_or(MissingField::Tags)?;

        Ok(ShoeFields {
            style_name,
            heel_height: self.heel_height,
            color,
            color_code: self.color_code,
            quote: self.quote,
            season: self.season,
            year,
            capsule_collection: self.capsule_collection,
            retail_price: self.retail_price,
            base_shoe: self.base_shoe,
            material,
            description,
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> serde_json::Value {
        json!({
            "styleName": "Classic Pump",
            "color": "Red",
            "year": 2020,
            "material": "Leather",
            "description": "A pump",
            "tags": ["pump", "red"]
        })
    }

    fn input(value: serde_json::Value) -> ShoeInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_complete_input_validates() {
        let fields = input(complete()).validate().unwrap();
        assert_eq!(fields.style_name, "Classic Pump");
        assert_eq!(fields.year, 2020);
        assert_eq!(fields.tags, vec!["pump", "red"]);
        assert!(fields.heel_height.is_none());
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        let cases = [
            ("styleName", MissingField::StyleName),
            ("color", MissingField::Color),
            ("year", MissingField::Year),
            ("material", MissingField::Material),
            ("description", MissingField::Description),
            ("tags", MissingField::Tags),
        ];

        for (key, expected) in cases {
            let mut body = complete();
            body.as_object_mut().unwrap().remove(key);
            assert_eq!(input(body).validate().unwrap_err(), expected, "missing {}", key);
        }
    }

    #[test]
    fn test_first_missing_field_in_order_wins() {
        let err = input(json!({ "year": 2020, "tags": [] })).validate().unwrap_err();
        assert_eq!(err, MissingField::StyleName);

        let err = input(json!({ "styleName": "Mule", "color": "Tan" }))
            .validate()
            .unwrap_err();
        assert_eq!(err, MissingField::Year);
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        let mut body = complete();
        body["color"] = json!("");
        assert_eq!(input(body).validate().unwrap_err(), MissingField::Color);

        let mut body = complete();
        body["year"] = json!(0);
        assert_eq!(input(body).validate().unwrap_err(), MissingField::Year);

        let mut body = complete();
        body["tags"] = json!(null);
        assert_eq!(input(body).validate().unwrap_err(), MissingField::Tags);
    }

    #[test]
    fn test_empty_tag_list_is_accepted() {
        let mut body = complete();
        body["tags"] = json!([]);
        let fields = input(body).validate().unwrap();
        assert!(fields.tags.is_empty());
    }

    #[test]
    fn test_optional_fields_pass_through() {
        let mut body = complete();
        body["heelHeight"] = json!(3.5);
        body["quote"] = json!("Walk tall");
        body["retailPrice"] = json!(495);
        body["unknownKey"] = json!(true);

        let fields = input(body).validate().unwrap();
        assert_eq!(fields.heel_height, Some(3.5));
        assert_eq!(fields.quote.as_deref(), Some("Walk tall"));
        assert_eq!(fields.retail_price, Some(495.0));
        assert!(fields.season.is_none());
    }

    #[test]
    fn test_messages() {
        assert_eq!(MissingField::StyleName.to_string(), "Shoe must have a style name");
        assert_eq!(MissingField::Tags.to_string(), "Shoe must have tags");
    }

    #[test]
    fn test_year_accepts_integral_floats() {
        let mut body = complete();
        body["year"] = json!(2020.0);
        assert_eq!(input(body).validate().unwrap().year, 2020);

        let mut body = complete();
        body["year"] = json!(0.0);
        assert_eq!(input(body).validate().unwrap_err(), MissingField::Year);
    }

    #[test]
    fn test_year_rejects_fractions_and_text() {
        let mut body = complete();
        body["year"] = json!(2020.5);
        assert!(serde_json::from_value::<ShoeInput>(body).is_err());

        let mut body = complete();
        body["year"] = json!("2020");
        assert!(serde_json::from_value::<ShoeInput>(body).is_err());
    }
}
