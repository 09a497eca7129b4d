//! # Query Translation
//!
//! Turns HTTP request parameters into store queries: the conjunctive filter,
//! the sort specification, and field projection. Both store backends
//! evaluate queries through this module so their semantics stay identical.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::models::{CatRepoModel, RepositoryError};

/// Query parameters accepted by `GET /cats/filtered`. Raw strings: parsing
/// happens in the translation to [`CatFilter`], and a value the store could
/// not use is reported as a store-layer failure.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub name_contains: Option<String>,
    pub name_starts_with: Option<String>,
    pub weight_greater_than: Option<String>,
}

/// Query parameters accepted by `GET /cats/ordered`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OrderParams {
    pub by: Option<String>,
    pub direction: Option<String>,
}

/// Conjunctive filter over cat records. Absent conditions are omitted, not
/// treated as "match nothing"; the empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatFilter {
    /// Case-insensitive substring match on `name`.
    pub name_contains: Option<String>,
    /// Case-insensitive prefix match on `name`.
    pub name_starts_with: Option<String>,
    /// Strict `>` match on `weight`.
    pub weight_greater_than: Option<f64>,
    /// Strict equality match on `isHungry`; records with the flag unset
    /// never match.
    pub is_hungry: Option<bool>,
}

impl CatFilter {
    /// The filter used by the bulk "delete fed" operation: exactly
    /// `isHungry == false`. Unset is deliberately not matched.
    pub fn fed() -> Self {
        Self {
            is_hungry: Some(false),
            ..Self::default()
        }
    }

    /// Evaluates the conjunction against a single record. Records lacking a
    /// filtered field fail that condition.
    pub fn matches(&self, cat: &CatRepoModel) -> bool {
        if let Some(needle) = &self.name_contains {
            match &cat.name {
                Some(name) => {
                    if !name.to_lowercase().contains(&needle.to_lowercase()) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        if let Some(prefix) = &self.name_starts_with {
            match &cat.name {
                Some(name) => {
                    if !name.to_lowercase().starts_with(&prefix.to_lowercase()) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        if let Some(threshold) = self.weight_greater_than {
            match cat.weight {
                Some(weight) => {
                    if weight <= threshold {
                        return false;
                    }
                }
                None => return false,
            }
        }
        if let Some(expected) = self.is_hungry {
            if cat.is_hungry != Some(expected) {
                return false;
            }
        }
        true
    }
}

impl TryFrom<FilterParams> for CatFilter {
    type Error = RepositoryError;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        let weight_greater_than = params
            .weight_greater_than
            .map(|raw| {
                raw.parse::<f64>().map_err(|_| {
                    RepositoryError::InvalidData(format!(
                        "Cannot compare weight against non-numeric value '{}'",
                        raw
                    ))
                })
            })
            .transpose()?;

        Ok(CatFilter {
            name_contains: params.name_contains,
            name_starts_with: params.name_starts_with,
            weight_greater_than,
            is_hungry: None,
        })
    }
}

/// Sort direction at the boundary. External tokens are translated into this
/// enum; an unrecognized token is a store-layer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = RepositoryError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "asc" | "ascending" | "1" => Ok(SortDirection::Ascending),
            "desc" | "descending" | "-1" => Ok(SortDirection::Descending),
            other => Err(RepositoryError::InvalidData(format!(
                "Unrecognized sort direction '{}'",
                other
            ))),
        }
    }
}

/// A sort over a single named field.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Translates the `by`/`direction` query parameters. No `by` means
    /// natural order regardless of `direction`; a present `by` with no
    /// `direction` sorts ascending.
    pub fn from_params(params: OrderParams) -> Result<Option<SortSpec>, RepositoryError> {
        let field = match params.by {
            Some(field) => field,
            None => return Ok(None),
        };
        let direction = match params.direction {
            Some(token) => token.parse()?,
            None => SortDirection::Ascending,
        };
        Ok(Some(SortSpec { field, direction }))
    }
}

/// Sorts records in place by the spec's field. The sort is stable, so
/// records that compare equal keep store-default order. Records lacking the
/// field order before those that have it when ascending.
pub fn sort_records(cats: &mut [CatRepoModel], spec: &SortSpec) {
    cats.sort_by(|a, b| {
        let ordering = compare_values(&a.attribute(&spec.field), &b.attribute(&spec.field));
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Extracts one value per record for the named attribute, identifier
/// excluded. An unknown attribute projects JSON null for every record.
pub fn project_field(cats: &[CatRepoModel], field: &str) -> Vec<Value> {
    cats.iter()
        .map(|cat| {
            if field == "id" {
                Value::Null
            } else {
                cat.attribute(field)
            }
        })
        .collect()
}

/// Orders two attribute values: null first, then numbers, strings, and
/// booleans, with anything else compared by its serialized form. Values of
/// the same kind compare naturally.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (x, y) => type_rank(x)
            .cmp(&type_rank(y))
            .then_with(|| x.to_string().cmp(&y.to_string())),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn cat(id: &str, name: Option<&str>, weight: Option<f64>, hungry: Option<bool>) -> CatRepoModel {
        CatRepoModel {
            id: id.to_string(),
            name: name.map(str::to_string),
            birth_date: None,
            is_hungry: hungry,
            weight,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = CatFilter::default();
        assert!(filter.matches(&cat("1", None, None, None)));
        assert!(filter.matches(&cat("2", Some("Milo"), Some(4.0), Some(true))));
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let filter = CatFilter {
            name_contains: Some("ARF".to_string()),
            ..CatFilter::default()
        };
        assert!(filter.matches(&cat("1", Some("Garfield"), None, None)));
        assert!(!filter.matches(&cat("2", Some("Milo"), None, None)));
    }

    #[test]
    fn test_absent_name_never_matches_name_conditions() {
        let contains = CatFilter {
            name_contains: Some("".to_string()),
            ..CatFilter::default()
        };
        let starts = CatFilter {
            name_starts_with: Some("".to_string()),
            ..CatFilter::default()
        };
        let nameless = cat("1", None, Some(3.0), None);
        assert!(!contains.matches(&nameless));
        assert!(!starts.matches(&nameless));
    }

    #[test]
    fn test_name_starts_with_prefix_only() {
        let filter = CatFilter {
            name_starts_with: Some("gar".to_string()),
            ..CatFilter::default()
        };
        assert!(filter.matches(&cat("1", Some("Garfield"), None, None)));
        assert!(!filter.matches(&cat("2", Some("Edgar"), None, None)));
    }

    #[test]
    fn test_weight_greater_than_is_strict() {
        let filter = CatFilter {
            weight_greater_than: Some(5.0),
            ..CatFilter::default()
        };
        assert!(!filter.matches(&cat("1", None, Some(5.0), None)));
        assert!(filter.matches(&cat("2", None, Some(5.1), None)));
        assert!(!filter.matches(&cat("3", None, None, None)));
    }

    #[test]
    fn test_conditions_combine_with_and() {
        let filter = CatFilter {
            name_contains: Some("o".to_string()),
            weight_greater_than: Some(3.0),
            ..CatFilter::default()
        };
        assert!(filter.matches(&cat("1", Some("Milo"), Some(4.0), None)));
        assert!(!filter.matches(&cat("2", Some("Milo"), Some(2.0), None)));
        assert!(!filter.matches(&cat("3", Some("Kira"), Some(4.0), None)));
    }

    #[test]
    fn test_fed_filter_requires_exact_false() {
        let filter = CatFilter::fed();
        assert!(filter.matches(&cat("1", None, None, Some(false))));
        assert!(!filter.matches(&cat("2", None, None, Some(true))));
        assert!(!filter.matches(&cat("3", None, None, None)));
    }

    #[test]
    fn test_filter_params_translation() {
        let filter = CatFilter::try_from(FilterParams {
            name_contains: Some("mi".to_string()),
            name_starts_with: None,
            weight_greater_than: Some("4.5".to_string()),
        })
        .unwrap();
        assert_eq!(filter.name_contains.as_deref(), Some("mi"));
        assert_eq!(filter.weight_greater_than, Some(4.5));
        assert_eq!(filter.is_hungry, None);
    }

    #[test]
    fn test_non_numeric_weight_is_invalid_data() {
        let result = CatFilter::try_from(FilterParams {
            weight_greater_than: Some("heavy".to_string()),
            ..FilterParams::default()
        });
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[test]
    fn test_direction_tokens() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("1".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert_eq!("-1".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_sort_spec_without_by_is_natural_order() {
        let spec = SortSpec::from_params(OrderParams {
            by: None,
            direction: Some("desc".to_string()),
        })
        .unwrap();
        assert_eq!(spec, None);
    }

    #[test]
    fn test_sort_spec_defaults_to_ascending() {
        let spec = SortSpec::from_params(OrderParams {
            by: Some("weight".to_string()),
            direction: None,
        })
        .unwrap()
        .unwrap();
        assert_eq!(spec.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_records_by_weight() {
        let mut cats = vec![
            cat("1", Some("A"), Some(3.0), None),
            cat("2", Some("B"), Some(1.0), None),
            cat("3", Some("C"), Some(2.0), None),
        ];
        sort_records(
            &mut cats,
            &SortSpec {
                field: "weight".to_string(),
                direction: SortDirection::Ascending,
            },
        );
        let weights: Vec<Option<f64>> = cats.iter().map(|c| c.weight).collect();
        assert_eq!(weights, vec![Some(1.0), Some(2.0), Some(3.0)]);

        sort_records(
            &mut cats,
            &SortSpec {
                field: "weight".to_string(),
                direction: SortDirection::Descending,
            },
        );
        let weights: Vec<Option<f64>> = cats.iter().map(|c| c.weight).collect();
        assert_eq!(weights, vec![Some(3.0), Some(2.0), Some(1.0)]);
    }

    #[test]
    fn test_sort_places_missing_field_first_ascending() {
        let mut cats = vec![
            cat("1", Some("A"), Some(3.0), None),
            cat("2", Some("B"), None, None),
        ];
        sort_records(
            &mut cats,
            &SortSpec {
                field: "weight".to_string(),
                direction: SortDirection::Ascending,
            },
        );
        assert_eq!(cats[0].id, "2");
    }

    #[test]
    fn test_sort_by_name_is_lexicographic() {
        let mut cats = vec![
            cat("1", Some("Whiskers"), None, None),
            cat("2", Some("Felix"), None, None),
            cat("3", Some("Milo"), None, None),
        ];
        sort_records(
            &mut cats,
            &SortSpec {
                field: "name".to_string(),
                direction: SortDirection::Ascending,
            },
        );
        let names: Vec<&str> = cats.iter().filter_map(|c| c.name.as_deref()).collect();
        assert_eq!(names, vec!["Felix", "Milo", "Whiskers"]);
    }

    #[test]
    fn test_project_field_extracts_values_in_order() {
        let cats = vec![
            cat("1", Some("A"), Some(1.0), None),
            cat("2", Some("B"), Some(2.0), None),
            cat("3", Some("C"), Some(3.0), None),
        ];
        assert_eq!(project_field(&cats, "weight"), vec![json!(1.0), json!(2.0), json!(3.0)]);
    }

    #[test]
    fn test_project_unknown_field_yields_nulls() {
        let cats = vec![cat("1", Some("A"), None, None), cat("2", Some("B"), None, None)];
        assert_eq!(project_field(&cats, "nineLives"), vec![Value::Null, Value::Null]);
    }

    #[test]
    fn test_project_excludes_identifier() {
        let cats = vec![cat("1", Some("A"), None, None)];
        assert_eq!(project_field(&cats, "id"), vec![Value::Null]);
    }
}
