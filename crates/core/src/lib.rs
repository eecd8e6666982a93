pub mod auth;
pub mod catalog;
pub mod config;
pub mod metrics;
pub mod queue;
pub mod sqlite;
pub mod testing;
pub mod ticket;

pub use auth::{
    create_authenticator, ApiKeyAuthenticator, AuthError, Authenticator, Credentials,
    OpenAccess, Operator,
};
pub use catalog::{CatalogError, Service, ServiceCatalog, ServiceId, ServiceName};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthMethod, Config, ConfigError,
    LogFormat, SanitizedConfig,
};
pub use queue::{
    QueueEntry, QueueError, QueueService, QueueStats, QueueStatus, TicketView, WaitEstimator,
    DEFAULT_MINUTES_PER_POSITION,
};
pub use sqlite::SqliteQueueStore;
pub use ticket::{
    NewTicket, QueueSlot, Ticket, TicketError, TicketId, TicketNumber, TicketStatus, TicketStore,
};
