//! State machine module
//!
//! Phase taxonomy, the published snapshot value, and the event fold.

mod snapshot;
mod states;
mod transitions;

pub use snapshot::SessionSnapshot;
pub use states::SessionPhase;
pub use transitions::fold;
