//! JSON helpers for files the console writes to disk.
//!
//! Output is pretty-printed with 2-space indentation and a trailing newline
//! so the session file stays readable when inspected by hand.

mod json;

pub use json::*;
