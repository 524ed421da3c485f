//! PostgreSQL adapters - database implementations of the record-store ports.
//!
//! - `PostgresProfileRepository` - dimension score rows, transactional deltas
//! - `PostgresAnswerEventStore` - append-only answer log
//! - `PostgresEngagementRepository` - reward and streak counters

mod answer_event_store;
mod engagement_repository;
mod profile_repository;

pub use answer_event_store::PostgresAnswerEventStore;
pub use engagement_repository::PostgresEngagementRepository;
pub use profile_repository::PostgresProfileRepository;
