//! Run control
//!
//! This module contains:
//! - `RunOptions` and their validation
//! - The `RunController` that sequences extract, probe, classify and rewrite
//! - The per-run timer and the `RunReport` summary

mod controller;
mod options;
mod report;
mod timer;

pub use controller::RunController;
pub use options::{RunMode, RunOptions};
pub use report::{print_summary, RunReport};
pub use timer::RunTimer;
