//! scopecrawl - bug bounty scope enumeration
//!
//! Walks the HackerOne program directory, asks the GraphQL endpoint for each
//! program's scope, and flattens the answers into target lists:
//!
//! - in-scope domains and wildcards, and the subset that pays bounties
//! - in-scope source code repositories (normalized to `https://` URLs), and
//!   the subset that pays bounties
//!
//! The crawl is strictly sequential. See [`crawler`] for how failures are
//! handled.

pub mod config;
pub mod crawler;
pub mod error;
pub mod hackerone;
pub mod output;
pub mod scope;

pub use error::{FetchError, GraphqlError};
