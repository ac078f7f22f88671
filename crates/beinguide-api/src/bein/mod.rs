//! beIN EPG client module.
//!
//! Fetches the EPG AJAX template for a date and extracts per-channel
//! program rows from its markup.

mod client;
mod html;
mod params;

#[allow(clippy::module_name_repetitions)]
pub use client::{BEIN_BASE_URL, BeinClient, BeinClientBuilder};
pub use html::{channel_identity, parse_epg_html};
pub use params::EpgQuery;
