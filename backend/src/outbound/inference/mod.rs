//! Inference outbound adapters.
//!
//! Thin HTTP implementation of the `CaptionSource` port, plus the
//! deterministic stand-in used when no credential is configured.

mod dto;
mod http_source;

pub use http_source::{HttpCaptionSource, MissingCredentialCaptionSource};
