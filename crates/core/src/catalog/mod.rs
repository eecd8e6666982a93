//! Service catalog - the set of counters visitors can queue for.
//!
//! Services are created and deleted by administrators. Tickets reference a
//! service by id but the catalog does not own them: deleting a service only
//! succeeds once nobody is waiting for it, and historical tickets keep
//! pointing at the removed id.

mod types;

pub use types::*;

use thiserror::Error;

/// Errors from catalog storage backends.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Service not found: {0}")]
    NotFound(ServiceId),

    #[error("Service {service_id} still has {waiting} waiting ticket(s)")]
    InUse { service_id: ServiceId, waiting: u32 },

    #[error("Database error: {0}")]
    Database(String),
}

/// Trait for service catalog storage.
pub trait ServiceCatalog: Send + Sync {
    /// Persist a new service and return it with its assigned id.
    fn create_service(&self, name: &ServiceName) -> Result<Service, CatalogError>;

    /// Get a service by id.
    fn get_service(&self, id: ServiceId) -> Result<Option<Service>, CatalogError>;

    /// List all services in insertion order.
    fn list_services(&self) -> Result<Vec<Service>, CatalogError>;

    /// Remove a service.
    ///
    /// Fails with `InUse` while the service has waiting tickets; the check
    /// and the delete happen atomically.
    fn delete_service(&self, id: ServiceId) -> Result<Service, CatalogError>;
}
