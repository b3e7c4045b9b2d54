//! Boundary layer for the pooling engine.
//!
//! Everything the HTTP-facing server (out of scope here) needs to sit in
//! front of `pool_core`: intake payload validation, the fare-quote query
//! surface with its default filling, and error → status translation. The
//! core algorithms never see raw external input.

pub mod intake;
pub mod quotes;
pub mod response;
