//! Site client library for beinguide.
//!
//! Provides the beIN EPG page client used as the guide's schedule source.

/// beIN EPG client.
pub mod bein;
