// pathscrub-core/src/engines/mod.rs
//! Concrete [`PathFilter`](crate::engine::PathFilter) implementations built
//! from rule configurations.

pub mod rule_engine;
