//! # tdd-gate-core
//!
//! Core framework for the tdd-gate file operation gate.
//!
//! This crate provides the building blocks the rules are made of:
//!
//! - [`LanguageRegistry`] for language detection and test conventions
//! - [`TestLocator`] for finding the tests a source file should have
//! - [`SkipFilter`] for files the gate never inspects
//! - [`DependencyFinder`] as the extension point for dependency analysis
//! - [`Violation`] and [`Decision`] for reporting gate outcomes
//!
//! ## Example
//!
//! ```ignore
//! use tdd_gate_core::{LanguageRegistry, TestLocator};
//!
//! let registry = LanguageRegistry::builtin();
//! let tests = TestLocator::new(&registry).find_test_files("src/calc.py".as_ref(), root)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod dependency;
mod error;
mod language;
mod locator;
mod skip;
mod types;

/// Utility modules for path handling.
pub mod utils;

pub use config::{ConfigError, GateConfig, GateSection, LanguageConfig};
pub use context::{TargetFile, ValidationContext};
pub use dependency::{DependencyFinder, DependencyFinderBox, NoDependencyFinder};
pub use error::GateError;
pub use language::{FileKind, FilePattern, LanguageRegistry, LanguageSpec};
pub use locator::TestLocator;
pub use skip::{SkipFilter, DEFAULT_SKIP_PATTERNS};
pub use types::{Decision, Operation, RuleId, Severity, Violation};
