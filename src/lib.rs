//! GitOps: CAPI Templates from the Command Line
//!
//! Lists Cluster API templates, their parameters and provider credentials from
//! a template catalog, and opens pull requests that add clusters rendered from
//! those templates.

pub mod adapters;
pub mod capi;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
