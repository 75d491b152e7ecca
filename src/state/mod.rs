// State management module
// Service records, validation, and the in-memory registry

pub mod app_state;
pub mod error;
pub mod registry;
pub mod service;

pub use app_state::{AppState, SharedState};
pub use error::RegistryError;
pub use registry::ServiceRegistry;
pub use service::{CreateServiceRequest, Patch, ServiceId, ServiceRecord, UpdateServiceRequest};
