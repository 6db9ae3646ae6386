//! Webring Common Types
//!
//! This crate holds the data every other webring crate shares:
//!
//! - [`member`] - the `Member` record and identity normalization
//! - [`registry`] - the immutable, ordered ring with its reverse index
//! - [`loader`] - the CSV member source
//! - [`error`] - the error taxonomy and `Result` alias
//!
//! # Example
//!
//! ```
//! use webring_common::{Member, Registry};
//!
//! let registry = Registry::build(vec![
//!     Member::new("A", "https://a.test"),
//!     Member::new("B", "https://b.test"),
//! ]).unwrap();
//!
//! assert_eq!(registry.lookup("https://b.test/"), Some(1));
//! ```

pub mod error;
pub mod loader;
pub mod member;
pub mod registry;

pub use error::{Result, WebringError};
pub use loader::{load_members, parse_members};
pub use member::{normalize_identity, Member};
pub use registry::Registry;
