//! XMLTV rendering of a collected guide.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::guide::Guide;
use crate::names::ChannelNameMapping;

/// Value of the root `generator-info-name` attribute.
pub const GENERATOR_INFO_NAME: &str = "Personal BeIN gen";

/// Value of the root `generator-info-url` attribute.
pub const GENERATOR_INFO_URL: &str = "https://hathoute.com";

/// Document prolog written before the `tv` element.
const PROLOG: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<!DOCTYPE tv SYSTEM "xmltv.dtd">"#,
    "\n",
);

/// `tv` root element.
#[derive(Debug, Serialize)]
#[serde(rename = "tv")]
struct Tv<'a> {
    #[serde(rename = "@generator-info-name")]
    generator_info_name: &'a str,
    #[serde(rename = "@generator-info-url")]
    generator_info_url: &'a str,
    channel: Vec<TvChannel<'a>>,
    programme: Vec<TvProgramme<'a>>,
}

/// `channel` element.
#[derive(Debug, Serialize)]
struct TvChannel<'a> {
    #[serde(rename = "@id")]
    id: &'a str,
    #[serde(rename = "display-name")]
    display_name: &'a str,
    icon: TvIcon<'a>,
}

/// `icon` element.
#[derive(Debug, Serialize)]
struct TvIcon<'a> {
    #[serde(rename = "@src")]
    src: &'a str,
}

/// `programme` element.
#[derive(Debug, Serialize)]
struct TvProgramme<'a> {
    #[serde(rename = "@start")]
    start: String,
    #[serde(rename = "@stop")]
    stop: String,
    #[serde(rename = "@channel")]
    channel: &'a str,
    title: &'a str,
    desc: &'a str,
}

/// Formats a timestamp as XMLTV `YYYYMMDDHHMMSS +0000`.
#[must_use]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%d%H%M%S +0000").to_string()
}

/// Renders the guide as an XMLTV document.
///
/// All `channel` elements come first in guide order, followed by every
/// channel's programmes in the same channel order.
///
/// # Errors
///
/// Returns an error if XML serialization fails.
pub fn render_guide(guide: &Guide, names: &ChannelNameMapping) -> Result<String> {
    let channel = guide
        .channels()
        .map(|c| TvChannel {
            id: c.name(),
            display_name: c.display_name(names),
            icon: TvIcon { src: c.icon_url() },
        })
        .collect();

    let programme = guide
        .channels()
        .flat_map(|c| {
            c.programs().iter().map(move |p| TvProgramme {
                start: format_timestamp(&p.interval().start_timestamp()),
                stop: format_timestamp(&p.interval().end_timestamp()),
                channel: c.name(),
                title: p.title(),
                desc: p.description(),
            })
        })
        .collect();

    let tv = Tv {
        generator_info_name: GENERATOR_INFO_NAME,
        generator_info_url: GENERATOR_INFO_URL,
        channel,
        programme,
    };

    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    tv.serialize(serializer)
        .context("failed to serialize XMLTV document")?;

    Ok(format!("{PROLOG}{body}\n"))
}

/// Renders the guide and writes it to `path`.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_guide(guide: &Guide, names: &ChannelNameMapping, path: &Path) -> Result<()> {
    tracing::info!("Building XMLTV file");
    let document = render_guide(guide, names)?;
    std::fs::write(path, document).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("XMLTV saved to {}", path.display());
    Ok(())
}
