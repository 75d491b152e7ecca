// Application state management
// Owns the service registry shared by all request handlers

use super::registry::ServiceRegistry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// State shared across handlers
///
/// All registry access goes through the one lock, so concurrent
/// create/update/delete calls are applied one at a time.
pub type SharedState = Arc<RwLock<AppState>>;

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registry of all service records
    pub services: ServiceRegistry,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            services: ServiceRegistry::seeded(),
        }
    }
}

impl AppState {
    /// Create the startup state, seeded with the default service record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state around an existing registry
    pub fn with_registry(services: ServiceRegistry) -> Self {
        Self { services }
    }

    /// Wrap the state for sharing between handlers
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert_eq!(state.services.len(), 1);
        assert_eq!(state.services.next_id(), 2);
    }

    #[test]
    fn test_with_registry() {
        let state = AppState::with_registry(ServiceRegistry::new());
        assert!(state.services.is_empty());
    }

    #[tokio::test]
    async fn test_shared_state_is_single_instance() {
        let shared = AppState::new().shared();
        let other = Arc::clone(&shared);
        other.write().await.services.remove("1").unwrap();
        assert!(shared.read().await.services.is_empty());
    }
}
