//! # View Layer
//!
//! Views turn a flow's view model into terminal output.

pub mod terminal_renderer;

pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
