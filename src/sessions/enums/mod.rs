pub mod poll_outcome;
pub mod session_outcome;
pub mod session_phase;
