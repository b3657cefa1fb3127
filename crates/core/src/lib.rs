pub mod catalog;
pub mod config;
pub mod metrics;
pub mod ticket;
pub mod triage;

pub use catalog::severity_for_price;
pub use config::{
    load_config, load_config_from_str, validate_config, AgentsConfig, Config, ConfigError,
    ServerConfig,
};
pub use ticket::{
    CreateTicketRequest, InMemoryTicketStore, Severity, SeverityBand, StatusFilter, Ticket,
    TicketError, TicketId, TicketStatus, TicketStore, TicketView,
};
pub use triage::{
    priority, PriorityWeights, TicketLifecycle, TriageQueue, TriageService,
};
