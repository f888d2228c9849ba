//! `retaildesk-console`: the back-office application state.
//!
//! All state lives in one [`BackOffice`] value. Every user interaction is an
//! [`Action`]; [`reduce`] turns the current state and an action into a new
//! state (or an error, leaving the old state untouched). [`Console`] is the
//! thin shell a UI host drives: it owns the state, the clock, the printer and
//! the notice line.

pub mod config;
pub mod console;
pub mod form;
pub mod state;

pub use config::ConsoleConfig;
pub use console::Console;
pub use form::ItemForm;
pub use state::{Action, BackOffice, Outcome, Transition, reduce};
