//! Terminal UI helpers for zup.
//!
//! This crate provides consistent output formatting, spinners, progress bars,
//! and error display for the zup CLI.

pub mod output;
pub mod spinner;
pub mod style;

pub use output::{Output, Verbosity};
pub use spinner::{Progress, Spinner};
pub use style::{apply_color_choice, colors_enabled, Style};
