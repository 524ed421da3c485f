//! Domain layer - pure model of the elicitation and scoring engine.

pub mod elicitation;
pub mod engagement;
pub mod foundation;
pub mod profile;
pub mod question;
