//! The flows a user interface would drive, as explicit state machines.

pub mod edit;
pub mod list;

pub use edit::*;
pub use list::*;
