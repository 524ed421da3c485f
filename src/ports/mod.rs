//! Ports - contracts to the collaborators outside the core.
//!
//! The engine never talks to a database, auth provider, or filesystem
//! directly; it goes through these traits, held as `Arc<dyn ...>` by the
//! application handlers.

mod answer_event_store;
mod engagement_repository;
mod identity_provider;
mod profile_repository;
mod question_source;
mod response_cache;

pub use answer_event_store::AnswerEventStore;
pub use engagement_repository::EngagementRepository;
pub use identity_provider::IdentityProvider;
pub use profile_repository::ProfileRepository;
pub use question_source::QuestionSource;
pub use response_cache::{CachedResponse, ResponseCache};
