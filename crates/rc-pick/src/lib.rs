//! Random pick engine for Rollcall.
//!
//! Provides uniform sampling without replacement, the four pick modes
//! (one or many, from the selection or from the whole roster), the result
//! display state machine, and `PickerSession`, the state container a
//! frontend owns for the lifetime of a session.

pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod sample;
pub mod session;

pub use config::PickerConfig;
pub use display::{PickResult, ResultDisplay};
pub use engine::{
    MULTI_PICK_COUNTS, RosterSample, pick_many, pick_many_from_all, pick_one, pick_one_from_all,
};
pub use error::{EngineResult, PickError};
pub use session::{PickSignal, PickerSession, RosterStatus};
