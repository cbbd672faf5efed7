//! Egalitarian (max-min) division of divisible resources.
//!
//! [`domain::compute_egalitarian_allocation`] takes a valuation matrix (rows
//! are agents, columns are resources) and returns the fractional allocation
//! that maximizes the smallest agent utility while allocating every resource
//! exactly once. All indices are zero-based.
//!
//! ```no_run
//! use egalitarian_allocation::domain::compute_egalitarian_allocation;
//!
//! let allocation = compute_egalitarian_allocation(&[
//!     vec![81.0, 19.0, 1.0],
//!     vec![70.0, 1.0, 29.0],
//! ])?;
//! println!("floor: {}", allocation.min_utility());
//! # Ok::<(), egalitarian_allocation::domain::AllocationError>(())
//! ```

pub mod api;
pub mod config;
pub mod convert;
pub mod domain;
pub mod models;
pub mod report;
