//! Bulk git refresher library.
//!
//! This crate refreshes every working copy directly under a directory by:
//! - Listing subdirectories, minus hidden and ignored names
//! - Checking out one branch in each
//! - Pulling from the remote, using credentials served by an askpass helper
//! - Isolating failures so one broken directory never stops the rest

pub mod askpass;
pub mod cli;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod git;
pub mod logging;
pub mod output;
pub mod workspace;
