//! Chairside backend library.
//!
//! A booking and content-sharing backend for a barbershop: customers book
//! appointments with technicians, and technicians publish AI-captioned cut
//! photos to a portfolio. Laid out hexagonally: domain entities and ports,
//! inbound HTTP adapters, and outbound adapters for the inference gateway,
//! object store, and PostgreSQL record store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
