//! # profiledb - In-Memory Profile Database
//!
//! profiledb keeps an ordered, uniquely keyed collection of person profiles
//! in memory and serves it through an interactive menu.
//!
//! ## Architecture
//!
//! - **Balanced index**: AVL tree keyed by profile id; insert, delete and
//!   exact search are O(log n) and the tree rebalances after every mutation
//! - **Traversals**: lazy pre-order, in-order and post-order walks
//! - **Shell**: menu front end that validates input before it reaches the index
//! - **Benchmark**: seeded random workload with latency percentiles
//!
//! ## Example Usage
//!
//! ```
//! use profiledb::{BalancedIndex, Profile, Sex, TraversalOrder};
//!
//! let mut index = BalancedIndex::new();
//! index.insert(Profile::new(2, "Grace", 45, Sex::Female, "555-0101")).unwrap();
//! index.insert(Profile::new(1, "Alan", 41, Sex::Male, "555-0102")).unwrap();
//!
//! // Duplicate ids are rejected and the stored profile is kept
//! assert!(index.insert(Profile::new(1, "Other", 20, Sex::Male, "0")).is_err());
//!
//! let found = index.search(1).unwrap();
//! assert_eq!(found.name, "Alan");
//!
//! let names: Vec<_> = index
//!     .traverse(TraversalOrder::InOrder)
//!     .map(|p| p.name.as_str())
//!     .collect();
//! assert_eq!(names, ["Alan", "Grace"]);
//!
//! // Deleting a missing id is a no-op
//! assert!(index.delete(99).is_none());
//! ```
//!
//! ## Modules
//!
//! - [`index`]: Height-balanced ordered index
//! - [`record`]: Profile record and field validation
//! - [`cli`]: Command-line interface, interactive shell and benchmark
//! - [`metrics`]: Latency histograms for the benchmark
//! - [`config`]: Configuration structures
//! - [`error`]: Error types and result aliases

/// Height-balanced ordered index
pub mod index;

/// Profile record type and field validation
pub mod record;

/// Configuration structures and validation
pub mod config;

/// Performance metrics collection and reporting
pub mod metrics;

/// Command-line interface and interactive shell
pub mod cli;

/// Error types and result aliases
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{DbError, Result};
pub use index::{BalancedIndex, Traversal, TraversalOrder};
pub use record::{FieldLimits, Profile, ProfileId, Sex};
