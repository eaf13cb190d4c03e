//! Catalog item normalization.
//!
//! The one place that touches raw catalog payloads. Every element passes
//! through [`normalize_item`] before filtering or serialization, so
//! defaulting and numeric coercion happen exactly once and never diverge
//! between the lookup and listing paths.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{CatalogItem, Nutrition};

/// Convert one raw upstream element into a [`CatalogItem`].
///
/// Fails with [`Error::InvalidItem`] when `name` is missing, not a string,
/// or empty after trimming. Taxonomy fields pass through when present;
/// nutrition fields default to `0.0` when absent or non-numeric.
pub fn normalize_item(raw: &Value) -> Result<CatalogItem> {
    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidItem("missing or empty name".to_string()))?;

    let nutritions = raw.get("nutritions");

    Ok(CatalogItem {
        name: name.to_string(),
        genus: string_field(raw, "genus"),
        family: string_field(raw, "family"),
        order: string_field(raw, "order"),
        nutrition: Nutrition {
            calories: numeric_field(nutritions, "calories"),
            sugar: numeric_field(nutritions, "sugar"),
            carbohydrates: numeric_field(nutritions, "carbohydrates"),
            protein: numeric_field(nutritions, "protein"),
            fat: numeric_field(nutritions, "fat"),
        },
    })
}

/// Normalize a whole upstream collection, dropping malformed elements.
///
/// One bad element never aborts the rest of the listing; callers that care
/// about the drop count can compare lengths.
pub fn normalize_all(raw: &[Value]) -> Vec<CatalogItem> {
    raw.iter().filter_map(|v| normalize_item(v).ok()).collect()
}

fn string_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

fn numeric_field(obj: Option<&Value>, key: &str) -> f64 {
    obj.and_then(|o| o.get(key)).map(coerce_number).unwrap_or(0.0)
}

/// Coerce a JSON value to a number: plain numbers pass through, numeric
/// strings parse, everything else is `0.0`.
pub(crate) fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_complete_item() {
        let raw = json!({
            "name": "Banana",
            "genus": "Musa",
            "family": "Musaceae",
            "order": "Zingiberales",
            "nutritions": {
                "calories": 96,
                "fat": 0.2,
                "sugar": 17.2,
                "carbohydrates": 22.0,
                "protein": 1.0
            }
        });

        let item = normalize_item(&raw).unwrap();
        assert_eq!(item.name, "Banana");
        assert_eq!(item.genus.as_deref(), Some("Musa"));
        assert_eq!(item.family.as_deref(), Some("Musaceae"));
        assert_eq!(item.order.as_deref(), Some("Zingiberales"));
        assert_eq!(item.nutrition.calories, 96.0);
        assert_eq!(item.nutrition.sugar, 17.2);
    }

    #[test]
    fn test_normalize_defaults_missing_fields() {
        let raw = json!({ "name": "Lingonberry" });

        let item = normalize_item(&raw).unwrap();
        assert_eq!(item.genus, None);
        assert_eq!(item.family, None);
        assert_eq!(item.order, None);
        assert_eq!(item.nutrition, Nutrition::default());
    }

    #[test]
    fn test_normalize_trims_name() {
        let raw = json!({ "name": "  Apple  " });
        assert_eq!(normalize_item(&raw).unwrap().name, "Apple");
    }

    #[test]
    fn test_normalize_rejects_missing_name() {
        let raw = json!({ "nutritions": { "calories": 50 } });
        assert!(matches!(normalize_item(&raw), Err(Error::InvalidItem(_))));
    }

    #[test]
    fn test_normalize_rejects_blank_name() {
        let raw = json!({ "name": "   " });
        assert!(matches!(normalize_item(&raw), Err(Error::InvalidItem(_))));
    }

    #[test]
    fn test_normalize_rejects_non_string_name() {
        let raw = json!({ "name": 42 });
        assert!(matches!(normalize_item(&raw), Err(Error::InvalidItem(_))));
    }

    #[test]
    fn test_numeric_string_coercion() {
        let raw = json!({
            "name": "Plum",
            "nutritions": { "calories": "46", "sugar": " 9.9 ", "protein": "n/a" }
        });

        let item = normalize_item(&raw).unwrap();
        assert_eq!(item.nutrition.calories, 46.0);
        assert_eq!(item.nutrition.sugar, 9.9);
        assert_eq!(item.nutrition.protein, 0.0);
    }

    #[test]
    fn test_non_numeric_nutrition_defaults_to_zero() {
        let raw = json!({
            "name": "Fig",
            "nutritions": { "calories": null, "sugar": {}, "fat": [1.0] }
        });

        let item = normalize_item(&raw).unwrap();
        assert_eq!(item.nutrition.calories, 0.0);
        assert_eq!(item.nutrition.sugar, 0.0);
        assert_eq!(item.nutrition.fat, 0.0);
    }

    #[test]
    fn test_normalize_all_drops_invalid_elements() {
        let raw = vec![
            json!({ "name": "Apple" }),
            json!({ "nutritions": { "calories": 999 } }),
            json!("not even an object"),
            json!({ "name": "Cherry" }),
        ];

        let items = normalize_all(&raw);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Apple");
        assert_eq!(items[1].name, "Cherry");
    }
}
