//! Elicitation module - the sequencer state machine and its events.

mod errors;
mod events;
mod selection;
mod session;

pub use errors::ElicitationError;
pub use events::{AnswerEvent, AnswerKind};
pub use selection::{FixedOrder, SelectionStrategy, Shuffled};
pub use session::{
    ElicitationPhase, ElicitationSession, Prompt, INCOMPARABLE_CADENCE,
};
