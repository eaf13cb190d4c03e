//! Declarative catalog filtering.
//!
//! A [`FilterSpec`] captures query constraints exactly as the caller set
//! them (`None` means "no constraint") and evaluates them conjunctively
//! against normalized catalog items. Evaluation is pure: no I/O, no state.

use serde::Serialize;

use crate::models::CatalogItem;

/// Constraint set for catalog listings. Unset fields always pass.
///
/// Serializes with camelCase keys and explicit `null`s so responses echo
/// exactly which constraints were applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub min_sugar: Option<f64>,
    pub max_calories: Option<f64>,
    pub family: Option<String>,
}

impl FilterSpec {
    /// Build a spec from raw query-parameter text.
    ///
    /// Numeric parameters that fail to parse, or parse to a non-finite
    /// value, are treated as absent, never as `0`. A blank `family` is
    /// absent too.
    pub fn from_params(
        min_sugar: Option<&str>,
        max_calories: Option<&str>,
        family: Option<&str>,
    ) -> Self {
        FilterSpec {
            min_sugar: min_sugar.and_then(parse_bound),
            max_calories: max_calories.and_then(parse_bound),
            family: family.and_then(|s| {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }),
        }
    }

    /// Conjunctive predicate: every set constraint must hold.
    ///
    /// `min_sugar` and `max_calories` are inclusive bounds. `family` is a
    /// case-insensitive exact match; an item without a family never matches
    /// a set family constraint.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let sugar_ok = self
            .min_sugar
            .map_or(true, |min| item.nutrition.sugar >= min);
        let calories_ok = self
            .max_calories
            .map_or(true, |max| item.nutrition.calories <= max);
        let family_ok = self.family.as_deref().map_or(true, |wanted| {
            item.family
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case(wanted))
        });
        sugar_ok && calories_ok && family_ok
    }
}

/// Parse one numeric bound; unparsable or non-finite input is no bound.
fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrition;

    fn item(name: &str, family: Option<&str>, sugar: f64, calories: f64) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            genus: None,
            family: family.map(str::to_string),
            order: None,
            nutrition: Nutrition {
                calories,
                sugar,
                ..Nutrition::default()
            },
        }
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = FilterSpec::default();
        assert!(spec.matches(&item("Banana", None, 12.0, 89.0)));
        assert!(spec.matches(&item("Lime", Some("Rutaceae"), 0.0, 0.0)));
    }

    #[test]
    fn test_conjunction_of_constraints() {
        let spec = FilterSpec {
            min_sugar: Some(5.0),
            max_calories: Some(100.0),
            family: None,
        };
        assert!(spec.matches(&item("Banana", None, 12.0, 89.0)));

        let stricter = FilterSpec {
            min_sugar: Some(20.0),
            max_calories: Some(100.0),
            family: None,
        };
        assert!(!stricter.matches(&item("Banana", None, 12.0, 89.0)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let spec = FilterSpec {
            min_sugar: Some(12.0),
            max_calories: Some(89.0),
            family: None,
        };
        assert!(spec.matches(&item("Banana", None, 12.0, 89.0)));
        assert!(!spec.matches(&item("Banana", None, 11.9, 89.0)));
        assert!(!spec.matches(&item("Banana", None, 12.0, 89.1)));
    }

    #[test]
    fn test_family_match_is_case_insensitive() {
        let spec = FilterSpec {
            family: Some("rosaceae".to_string()),
            ..FilterSpec::default()
        };
        assert!(spec.matches(&item("Apple", Some("Rosaceae"), 10.0, 52.0)));
        assert!(!spec.matches(&item("Banana", Some("Musaceae"), 17.0, 96.0)));
    }

    #[test]
    fn test_missing_family_never_matches_constraint() {
        let spec = FilterSpec {
            family: Some("rosaceae".to_string()),
            ..FilterSpec::default()
        };
        assert!(!spec.matches(&item("Mystery", None, 10.0, 52.0)));
    }

    #[test]
    fn test_from_params_parses_bounds() {
        let spec = FilterSpec::from_params(Some(" 7.5 "), Some("100"), Some(" Rosaceae "));
        assert_eq!(spec.min_sugar, Some(7.5));
        assert_eq!(spec.max_calories, Some(100.0));
        assert_eq!(spec.family.as_deref(), Some("Rosaceae"));
    }

    #[test]
    fn test_from_params_ignores_unparsable_numbers() {
        let spec = FilterSpec::from_params(Some("lots"), Some(""), None);
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn test_from_params_ignores_non_finite_numbers() {
        let spec = FilterSpec::from_params(Some("NaN"), Some("inf"), None);
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn test_from_params_drops_blank_family() {
        let spec = FilterSpec::from_params(None, None, Some("   "));
        assert_eq!(spec.family, None);
    }

    #[test]
    fn test_spec_serializes_camel_case_with_nulls() {
        let spec = FilterSpec {
            min_sugar: Some(9.0),
            max_calories: None,
            family: Some("rosaceae".to_string()),
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "minSugar": 9.0, "maxCalories": null, "family": "rosaceae" })
        );
    }
}
