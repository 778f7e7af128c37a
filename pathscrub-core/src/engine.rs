// pathscrub-core/src/engine.rs
//! Defines the `PathFilter` trait, the narrow interface through which request
//! logging pipelines consume path redaction.
//!
//! Implementations must be pure: the same input always yields the same output,
//! and no state is carried between calls. That makes every filter safe to
//! share across threads without locking.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::sync::Arc;

use crate::pattern::PathPattern;

/// A pluggable path redaction step.
pub trait PathFilter: Send + Sync {
    /// Returns `path` with sensitive segments replaced.
    ///
    /// Implementations return `Cow::Borrowed` whenever no new string had to be
    /// built, either because nothing matched or because a precomputed result
    /// could be reused.
    fn filter<'a>(&'a self, path: &'a str) -> Cow<'a, str>;

    /// Runs `self`, then `next` on the result.
    fn then<F: PathFilter>(self, next: F) -> Chain<Self, F>
    where
        Self: Sized,
    {
        Chain { first: self, second: next }
    }
}

/// Two filters applied in sequence. Built by [`PathFilter::then`].
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: PathFilter, B: PathFilter> PathFilter for Chain<A, B> {
    fn filter<'a>(&'a self, path: &'a str) -> Cow<'a, str> {
        match self.first.filter(path) {
            Cow::Borrowed(intermediate) => self.second.filter(intermediate),
            Cow::Owned(intermediate) => Cow::Owned(self.second.filter(&intermediate).into_owned()),
        }
    }
}

impl PathFilter for PathPattern {
    fn filter<'a>(&'a self, path: &'a str) -> Cow<'a, str> {
        PathPattern::filter(self, path)
    }
}

impl<F: PathFilter + ?Sized> PathFilter for Box<F> {
    fn filter<'a>(&'a self, path: &'a str) -> Cow<'a, str> {
        (**self).filter(path)
    }
}

impl<F: PathFilter + ?Sized> PathFilter for Arc<F> {
    fn filter<'a>(&'a self, path: &'a str) -> Cow<'a, str> {
        (**self).filter(path)
    }
}
