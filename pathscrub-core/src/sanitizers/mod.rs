//! Rule compilation for the path redaction engine.
//!
//! Turns configured [`PathRule`](crate::config::PathRule)s into compiled
//! [`PathPattern`](crate::pattern::PathPattern)s and caches the result per
//! rule set.

pub mod compiler;
