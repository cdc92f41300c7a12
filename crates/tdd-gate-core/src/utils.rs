//! Utility functions shared by the locator, filter and rules.

pub mod paths;

#[doc(inline)]
pub use paths::{normalize, relative_to, resolve_against};
