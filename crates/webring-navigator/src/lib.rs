//! Webring Navigation
//!
//! The request-independent core of the webring:
//!
//! - [`resolver`] - maps a request to the visitor's current ring position
//! - [`navigator`] - next / previous / random with wraparound and a random
//!   fallback for unresolved positions
//! - [`health_checker`] - the startup liveness probe of member sites
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use webring_common::{Member, Registry};
//! use webring_navigator::{NavigationRequest, Navigator, PositionResolver, ReferrerResolver};
//!
//! let registry = Arc::new(Registry::build(vec![
//!     Member::new("A", "https://a.test"),
//!     Member::new("B", "https://b.test"),
//!     Member::new("C", "https://c.test"),
//! ]).unwrap());
//!
//! let request = NavigationRequest::with_referer("https://b.test/blog");
//! let position = ReferrerResolver.resolve(&registry, &request);
//! let navigator = Navigator::new(registry);
//! assert_eq!(navigator.next(position).url, "https://c.test");
//! ```

pub mod health_checker;
pub mod navigator;
pub mod resolver;

pub use health_checker::{HealthCheckConfig, HealthCheckStatus, HealthChecker, HealthReport, MemberHealth};
pub use navigator::{modulo, Direction, Navigator};
pub use resolver::{
    NavigationRequest, PositionResolver, QueryResolver, ReferrerResolver, ResolutionStrategy,
};
