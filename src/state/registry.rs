//! Service registry
//!
//! Ordered in-memory collection of service records plus the id counter.

use super::error::RegistryError;
use super::service::{
    parse_id, CreateServiceRequest, NewService, ServiceId, ServiceRecord, UpdateServiceRequest,
};
use chrono::Utc;
use serde_json::Number;

/// First id handed out by an empty registry
const FIRST_ID: ServiceId = 1;

/// In-memory service registry
///
/// Records are kept in insertion order. Ids come from a counter that only
/// moves forward, so an id is never reissued after its record is deleted.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    /// Records in creation order
    services: Vec<ServiceRecord>,
    /// Id for the next successful create
    next_id: ServiceId,
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self {
            services: Vec::new(),
            next_id: FIRST_ID,
        }
    }
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the startup seed record (id 1)
    pub fn seeded() -> Self {
        let mut registry = Self::new();
        registry.insert(NewService {
            name: "Basic Support".to_string(),
            description: Some("Email support within business hours".to_string()),
            price: Number::from(10),
        });
        registry
    }

    /// Validate the request and append a new record
    ///
    /// The id counter only advances when validation succeeds.
    pub fn create(
        &mut self,
        request: CreateServiceRequest,
    ) -> Result<ServiceRecord, RegistryError> {
        let service = request.validate()?;
        Ok(self.insert(service).clone())
    }

    /// Records whose name or description contains `query`, ignoring case
    ///
    /// A missing or blank query returns every record. Order is preserved.
    pub fn list(&self, query: Option<&str>) -> Vec<&ServiceRecord> {
        let needle = query.map(str::trim).unwrap_or_default().to_lowercase();
        if needle.is_empty() {
            return self.services.iter().collect();
        }

        self.services
            .iter()
            .filter(|service| service.matches(&needle))
            .collect()
    }

    /// Look up a record by its raw id path segment
    pub fn get(&self, raw_id: &str) -> Result<&ServiceRecord, RegistryError> {
        let id = parse_id(raw_id)?;
        self.services
            .iter()
            .find(|service| service.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Apply the fields present in `request` to an existing record
    ///
    /// The stored record is replaced at the same position only after the
    /// request has been validated.
    pub fn update(
        &mut self,
        raw_id: &str,
        request: UpdateServiceRequest,
    ) -> Result<ServiceRecord, RegistryError> {
        let id = parse_id(raw_id)?;
        let index = self.position(id)?;
        let changes = request.validate()?;

        let updated = self.services[index].with_changes(changes, Utc::now());
        self.services[index] = updated.clone();
        Ok(updated)
    }

    /// Remove a record and return its last value
    pub fn remove(&mut self, raw_id: &str) -> Result<ServiceRecord, RegistryError> {
        let id = parse_id(raw_id)?;
        let index = self.position(id)?;
        Ok(self.services.remove(index))
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the registry holds no records
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Id the next successful create will receive
    pub fn next_id(&self) -> ServiceId {
        self.next_id
    }

    fn insert(&mut self, service: NewService) -> &ServiceRecord {
        let id = self.next_id;
        self.next_id += 1;
        self.services.push(ServiceRecord::new(id, service, Utc::now()));
        &self.services[self.services.len() - 1]
    }

    fn position(&self, id: ServiceId) -> Result<usize, RegistryError> {
        self.services
            .iter()
            .position(|service| service.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }
}
