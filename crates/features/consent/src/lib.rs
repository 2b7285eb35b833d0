//! Consent gate for the tracked modules.
//!
//! Each module has one boolean consent entry in the vault. It starts absent (locked), is
//! set by the single "enter" action, and is only cleared by a full wipe of the module.
//! Data entry requires an [`Access`] token, which only an unlocked gate hands out.

mod error;
mod gate;

pub use error::{ConsentError, ConsentErrorExt};
pub use gate::{Access, ConsentGate, GateController, GateState};
