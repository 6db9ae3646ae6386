//! # Webring
//!
//! A webring serves an index page plus three redirects that walk a visitor
//! around an ordered, circular list of member sites:
//!
//! - `/next` and `/previous` step from the member the visitor came from,
//!   wrapping at both ends
//! - `/im-feeling-lucky` picks a member uniformly at random
//!
//! When the current member cannot be determined, `/next` and `/previous`
//! fall back to a random member instead of failing.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`common`] - members, the registry, the CSV loader and errors
//! - [`navigator`] - position resolvers, the navigator and the liveness probe
//! - [`server`] - the index template and the axum HTTP server

pub use webring_common as common;
pub use webring_navigator as navigator;
pub use webring_server as server;
