//! Object storage outbound adapters.

mod http_store;

pub use http_store::HttpObjectStore;
