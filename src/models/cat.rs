//! # Cat Record Models
//!
//! Defines the persisted cat record and the request shapes used to create
//! and update it. Known fields are strongly typed; any extra attributes sent
//! by a client are captured in a flattened map and passed through unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::models::RepositoryError;

/// A cat record as held by the store.
///
/// All fields except `id` are optional; the store assigns `id` at insertion
/// and it is immutable for the lifetime of the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CatRepoModel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "birthDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(rename = "isHungry", default, skip_serializing_if = "Option::is_none")]
    pub is_hungry: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

/// Body of a create request. Same shape as [`CatRepoModel`] minus the
/// identifier; unknown attributes are kept and persisted as provided.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatCreateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "birthDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(rename = "isHungry", default, skip_serializing_if = "Option::is_none")]
    pub is_hungry: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

impl CatCreateRequest {
    /// Coerces a raw JSON body into a create request.
    ///
    /// There is no validation layer in front of the store: a body whose
    /// fields cannot be coerced into the record shape is reported as a
    /// store-layer failure, not a bad request.
    pub fn from_json(body: Value) -> Result<Self, RepositoryError> {
        serde_json::from_value(body)
            .map_err(|e| RepositoryError::InvalidData(format!("Invalid cat record shape: {}", e)))
    }

    /// Builds the record the store will hold under the given identifier.
    pub fn into_model(self, id: String) -> CatRepoModel {
        CatRepoModel {
            id,
            name: self.name,
            birth_date: self.birth_date,
            is_hungry: self.is_hungry,
            weight: self.weight,
            extra: self.extra,
        }
    }
}

impl CatRepoModel {
    /// Looks up an attribute by its wire name (`name`, `birthDate`,
    /// `isHungry`, `weight`, `id`, or any extra attribute). Absent
    /// attributes yield JSON null.
    pub fn attribute(&self, field: &str) -> Value {
        let doc = serde_json::to_value(self).unwrap_or(Value::Null);
        match doc {
            Value::Object(map) => map.get(field).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Applies a partial update: every attribute present in `fields` replaces
    /// the record's value for that attribute, everything else is retained.
    /// The identifier is immutable and ignored if present in the body.
    pub fn apply_update(&self, fields: &Map<String, Value>) -> Result<CatRepoModel, RepositoryError> {
        let mut doc = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => {
                return Err(RepositoryError::InvalidData(
                    "Cat record did not serialize to an object".to_string(),
                ))
            }
        };
        for (key, value) in fields {
            if key == "id" {
                continue;
            }
            doc.insert(key.clone(), value.clone());
        }
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| RepositoryError::InvalidData(format!("Invalid cat record shape: {}", e)))
    }
}
