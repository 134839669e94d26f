//! CLI command implementations

pub mod crawl;
pub mod init;
