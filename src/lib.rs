//! depdiff - Dependency changelog generator library
//!
//! This library reads the latest commit of a git repository and reports
//! how the dependency blocks of its manifest files changed:
//! - Added, removed and updated dependencies per block
//! - Edits that cancel out within the commit are dropped
//! - Markdown changelog, JSON and terminal text renderings

pub mod bounds;
pub mod cli;
pub mod config;
pub mod domain;
pub mod driver;
pub mod error;
pub mod finalize;
pub mod git;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod reconcile;
pub mod source;
