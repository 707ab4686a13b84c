//! Modal dialogs
//!
//! Each dialog runs a small blocking event loop of its own, redrawing the
//! caller's screen underneath so the browse view stays visible.

pub mod choice;
pub mod form;
pub mod help;

pub use choice::run_choice;
pub use form::run_form;
pub use help::run_help;
