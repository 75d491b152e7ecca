//! Service records and the request inputs that create or change them
//!
//! Input structs accept loosely-typed JSON and are turned into checked values by `validate`.

use super::error::RegistryError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Unique identifier for a service record
pub type ServiceId = u64;

/// A single service entry held by the registry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    /// Identifier assigned at creation, never reused
    pub id: ServiceId,
    /// Display name, always trimmed and non-empty
    pub name: String,
    /// Optional free-text description, omitted from JSON when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Non-negative, finite price
    pub price: Number,
    /// Creation time, immutable
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Time of the last successful update (or creation)
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl ServiceRecord {
    /// Build a fresh record with both timestamps set to `now`
    pub fn new(id: ServiceId, service: NewService, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: service.name,
            description: service.description,
            price: service.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Price as a float
    pub fn price_value(&self) -> f64 {
        self.price.as_f64().unwrap_or_default()
    }

    /// Case-insensitive substring match on name or description
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    /// Produce the updated record, leaving `self` untouched
    pub fn with_changes(&self, changes: ServiceChanges, now: DateTime<Utc>) -> Self {
        let description = match changes.description {
            Patch::Missing => self.description.clone(),
            Patch::Null => None,
            Patch::Value(description) => Some(description),
        };

        Self {
            id: self.id,
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            description,
            price: changes.price.unwrap_or_else(|| self.price.clone()),
            created_at: self.created_at,
            updated_at: now.max(self.created_at),
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix
fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// A JSON field that distinguishes "not sent" from "sent as null"
///
/// Use with `#[serde(default)]` so a missing field becomes `Patch::Missing`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Field was not present in the body
    #[default]
    Missing,
    /// Field was present with an explicit `null`
    Null,
    /// Field was present with a value
    Value(T),
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

/// Create service request body
#[derive(Debug, Default, Deserialize)]
pub struct CreateServiceRequest {
    /// Required; must be a non-blank string
    #[serde(default)]
    pub name: Option<Value>,
    /// Optional string
    #[serde(default)]
    pub description: Option<Value>,
    /// Required; must be a finite, non-negative number
    #[serde(default)]
    pub price: Option<Value>,
}

/// Update service request body
#[derive(Debug, Default, Deserialize)]
pub struct UpdateServiceRequest {
    /// New name (optional)
    #[serde(default)]
    pub name: Patch<Value>,
    /// New description; `null` clears it
    #[serde(default)]
    pub description: Patch<Value>,
    /// New price (optional)
    #[serde(default)]
    pub price: Patch<Value>,
}

/// Validated input for a new record
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    /// Trimmed, non-empty name
    pub name: String,
    /// Trimmed description, `None` when absent or blank
    pub description: Option<String>,
    /// Checked price
    pub price: Number,
}

/// Validated set of changes for an existing record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceChanges {
    /// Replacement name
    pub name: Option<String>,
    /// Replacement description, or `Null` to clear it
    pub description: Patch<String>,
    /// Replacement price
    pub price: Option<Number>,
}

impl CreateServiceRequest {
    /// Check required fields and normalize whitespace
    pub fn validate(self) -> Result<NewService, RegistryError> {
        let name = self
            .name
            .as_ref()
            .and_then(non_empty_string)
            .ok_or_else(|| RegistryError::Validation("name is required".to_string()))?;

        let price = self
            .price
            .as_ref()
            .and_then(non_negative_number)
            .ok_or_else(|| {
                RegistryError::Validation("price must be a non-negative number".to_string())
            })?;

        let description = match self.description {
            None | Some(Value::Null) => None,
            Some(Value::String(description)) => {
                Some(description.trim().to_string()).filter(|d| !d.is_empty())
            }
            Some(_) => return Err(description_type_error()),
        };

        Ok(NewService {
            name,
            description,
            price,
        })
    }
}

impl UpdateServiceRequest {
    /// Check the fields that were sent; omitted fields stay untouched
    pub fn validate(self) -> Result<ServiceChanges, RegistryError> {
        let name = match self.name {
            Patch::Missing => None,
            Patch::Null => return Err(update_name_error()),
            Patch::Value(value) => Some(non_empty_string(&value).ok_or_else(update_name_error)?),
        };

        let price = match self.price {
            Patch::Missing => None,
            Patch::Null => return Err(update_price_error()),
            Patch::Value(value) => {
                Some(non_negative_number(&value).ok_or_else(update_price_error)?)
            }
        };

        let description = match self.description {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(Value::String(description)) => {
                Patch::Value(description.trim().to_string())
            }
            Patch::Value(_) => return Err(description_type_error()),
        };

        Ok(ServiceChanges {
            name,
            description,
            price,
        })
    }
}

/// Parse an id path segment into a positive integer
///
/// Accepts decimal digits with an optional leading `+`. A number too large
/// for `ServiceId` can never have been assigned, so it is reported as not found.
pub fn parse_id(raw: &str) -> Result<ServiceId, RegistryError> {
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RegistryError::InvalidId(raw.to_string()));
    }

    match digits.parse::<ServiceId>() {
        Ok(0) => Err(RegistryError::InvalidId(raw.to_string())),
        Ok(id) => Ok(id),
        Err(_) => Err(RegistryError::NotFound(raw.to_string())),
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_negative_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|_| number.clone()),
        _ => None,
    }
}

fn update_name_error() -> RegistryError {
    RegistryError::Validation("name must be non-empty string".to_string())
}

fn update_price_error() -> RegistryError {
    RegistryError::Validation("price must be non-negative number".to_string())
}

fn description_type_error() -> RegistryError {
    RegistryError::Validation("description must be a string".to_string())
}
