// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # Enumerator
//!
//! Counts the permutations or combinations of a multiset that satisfy a
//! conjunction of conditions.
//!
//! ## Core Concept
//!
//! A request names an input multiset, a mode (permutation or combination), an
//! arrangement length, whether values may repeat, and a list of conditions.
//! The engine picks the cheapest strategy that answers it:
//!
//! - **Closed forms** when there is nothing to filter (`n! / m1!...`, nPr,
//!   nCr, u^r, stars and bars)
//! - **Recurrences** for lone derangement and sum conditions
//! - **Exhaustive search** while the search space is affordable
//! - **Monte Carlo sampling** beyond that, flagged as an approximation
//!
//! ## Quick Start
//!
//! ```rust
//! use enumerator::{ConditionSpec, Enumerator, Mode, Request};
//!
//! let mut session = Enumerator::default();
//!
//! // {1,4} and {2,3}
//! let request = Request::new("1, 2, 3, 4", Mode::Combination, 2).with_condition(
//!     ConditionSpec::new("sum").with_arg("5").with_comparison("equal"),
//! );
//! let result = session.run(&request)?;
//! assert_eq!(result.count, Some(2));
//! assert!(!result.is_approximation);
//! # Ok::<(), enumerator::Error>(())
//! ```
//!
//! ## Request Format
//!
//! Requests load from YAML or JSON:
//!
//! ```yaml
//! input: "abcd"
//! mode: permutation
//! length: 4
//! repetition: false
//! conditions:
//!   - condition: startsWith
//!     arg: "ab"
//!   - condition: sum
//!     arg: "400"
//!     comparison: less
//!     negate: true
//! ```

// Primitives
pub mod combinatorics;
pub mod error;
pub mod input;
pub mod random;

// Engine
pub mod condition;
pub mod config;
pub mod enumerator;
pub mod method;
pub mod selector;

// Re-exports
pub use condition::{
    catalogue, parse_condition, Aggregate, ArgType, Comparison, Condition, ConditionInfo,
    ConditionKind, ConditionSpec, Context, Mode,
};
pub use config::EngineConfig;
pub use enumerator::{EnumResult, Enumerator, Request};
pub use error::{Error, Result};
pub use method::{EnumMethod, Outcome, Problem};
pub use selector::EnSelector;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
