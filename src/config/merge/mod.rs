//! Merge rules applied before any source is layered.

pub mod merge_policy;
