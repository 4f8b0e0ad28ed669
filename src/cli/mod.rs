//! Interactive shell and the non-interactive summary mode.

pub mod output;
pub mod session;

pub use session::run_cli;
