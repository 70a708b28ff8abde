// NOTE: Allow these for the whole crate.
#![allow(clippy::collapsible_if)]

pub mod log;
pub mod utils;

// Re-exported so `bitflags_with_display!` expands without
// callers having to depend on bitflags directly.
pub use bitflags;
