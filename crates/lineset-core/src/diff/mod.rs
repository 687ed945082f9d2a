//! Set-difference engine.
//!
//! Compares two line sequences as unordered collections and produces the
//! lines unique to each side. No positional alignment is attempted.
//!
//! ## Entry point
//!
//! ```
//! use lineset_core::diff::{compute_unique, DiffMode};
//! use lineset_core::lines::extract_lines;
//!
//! let a = extract_lines("x\ny\nz\n");
//! let b = extract_lines("y\nw\n");
//! let unique = compute_unique(&a, &b, DiffMode::Multiset);
//! assert_eq!(unique.unique_a, vec!["x", "z"]);
//! assert_eq!(unique.unique_b, vec!["w"]);
//! ```
//!
//! ## Guarantees
//!
//! - **Order preservation**: survivors keep their relative order from the input.
//! - **Exact membership**: lines compare by exact string equality.
//! - **Determinism**: identical inputs produce identical output.

pub mod engine;
pub mod model;

pub use engine::{compute_unique, naive_unique};
pub use model::{DiffMode, UniqueLines};
