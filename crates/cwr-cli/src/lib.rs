//! CLI plumbing for the `cwr-import` binary.

pub mod cli;
pub mod logging;
pub mod pipeline;
