//! citypath CLI library.
//!
//! Terminal styling, output formatting and the interactive session used by
//! the `citypath` binary.

pub mod output;
pub mod session;
pub mod terminal;
