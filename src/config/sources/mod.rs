//! Configuration sources, applied in precedence order by the loader.

pub mod environment;
pub mod explicit_file;
pub mod global_file;
