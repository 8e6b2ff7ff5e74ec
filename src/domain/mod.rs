//! Domain types. Pure data structures with no actor-specific concerns.

mod user;

pub use user::*;
