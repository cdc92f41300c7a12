//! # tdd-gate
//!
//! Test-Driven Development gate for file operations.
//!
//! This is the main facade crate that re-exports core functionality and rules,
//! and provides the [`RuleEngine`] that ties them together.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let decision = tdd_gate::validate("write", "src/calc.py", ".", false)?;
//! if !decision.allowed {
//!     if let Some(violation) = &decision.violation {
//!         eprintln!("{violation}");
//!     }
//! }
//! ```
//!
//! ## Custom Engine
//!
//! ```rust,ignore
//! use tdd_gate::{RuleEngine, ValidationContext, Operation};
//!
//! let engine = RuleEngine::builder()
//!     .registry(config.registry()?)
//!     .dependency_finder(MyImportScanner::new())
//!     .build();
//!
//! let ctx = ValidationContext::new(".")?.with_strict(true);
//! let decision = engine.validate(Operation::Edit, "src/calc.py", &ctx)?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use tdd_gate_core::*;

/// Built-in rules.
pub mod rules {
    pub use tdd_gate_rules::*;
}

mod engine;

pub use engine::{validate, validate_refactor, RuleEngine, RuleEngineBuilder};
