//! Catalog adapters: concrete backends for the capabilities in [`crate::capi`].

pub mod http;

pub use http::HttpClient;
