//! Channel and program extraction from the EPG template markup.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use beinguide_epg::{ChannelListing, RawEntry};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Selector for the first channel block; its siblings are the other channels.
#[allow(clippy::expect_used)]
static FIRST_CHANNEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#channels_1").expect("failed to compile channel selector")
});

/// Id prefix shared by channel blocks.
const CHANNEL_ID_PREFIX: &str = "channels_";

/// Path from the logo section to the logo image.
const LOGO_PATH: &[&str] = &["div", "div", "div", "a", "img"];

/// Path from the schedule section to program rows.
const ROW_PATH: &[&str] = &["div", "ul", "li"];

/// Spacer rows at the head of every channel's row list.
const LEADING_SPACER_ROWS: usize = 3;

/// Child elements of `el` with the given tag name.
fn child_elements<'a>(el: ElementRef<'a>, tag: &str) -> impl Iterator<Item = ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |c| c.value().name() == tag)
}

/// First element reached by following `path` through child elements.
fn find_path<'a>(el: ElementRef<'a>, path: &[&str]) -> Option<ElementRef<'a>> {
    let Some((tag, rest)) = path.split_first() else {
        return Some(el);
    };
    child_elements(el, tag).find_map(|c| find_path(c, rest))
}

/// Every element reached by following `path`, in document order.
fn collect_path<'a>(el: ElementRef<'a>, path: &[&str], out: &mut Vec<ElementRef<'a>>) {
    let Some((tag, rest)) = path.split_first() else {
        out.push(el);
        return;
    };
    for child in child_elements(el, tag) {
        collect_path(child, rest, out);
    }
}

/// Trimmed text content.
fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

/// Channel identity from its logo URL: the file name minus its last
/// three characters (`".../beinsports1.png"` gives `"beinsports1."`).
#[must_use]
pub fn channel_identity(icon_url: &str) -> String {
    let file = icon_url.rsplit('/').next().unwrap_or(icon_url);
    let cut = file.char_indices().rev().nth(2).map_or(0, |(i, _)| i);
    String::from(file.get(..cut).unwrap_or_default())
}

/// Extracts one program row.
fn parse_entry(li: ElementRef<'_>) -> Result<RawEntry> {
    let mut sections = child_elements(li, "div");
    let info = sections.next().context("missing title section")?;
    let timer = sections.next().context("missing time section")?;

    let mut texts = child_elements(info, "p").map(text_of);
    let title = texts.next().context("missing title")?;
    let description = texts.next().context("missing description")?;
    let time_range = child_elements(timer, "p")
        .next()
        .map(text_of)
        .context("missing time range")?;

    Ok(RawEntry {
        title,
        description,
        time_range,
    })
}

/// Extracts one channel block, resolving its logo against `page_url`.
fn parse_channel(block: ElementRef<'_>, page_url: &Url) -> Result<ChannelListing> {
    let block_id = block.value().attr("id").unwrap_or_default();
    tracing::debug!("Processing {block_id}");

    let mut sections = child_elements(block, "div");
    let header = sections
        .next()
        .with_context(|| format!("{block_id}: missing logo section"))?;
    let schedule = sections
        .next()
        .with_context(|| format!("{block_id}: missing schedule section"))?;

    let logo = find_path(header, LOGO_PATH).with_context(|| format!("{block_id}: logo not found"))?;
    let src = logo
        .value()
        .attr("src")
        .with_context(|| format!("{block_id}: logo has no src"))?;
    let icon_url = page_url
        .join(src.trim())
        .with_context(|| format!("{block_id}: invalid logo URL {src:?}"))?;

    let mut rows = Vec::new();
    collect_path(schedule, ROW_PATH, &mut rows);
    let entries = rows
        .into_iter()
        .skip(LEADING_SPACER_ROWS)
        .enumerate()
        .map(|(i, li)| {
            parse_entry(li).with_context(|| format!("{block_id}: invalid program row {i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ChannelListing {
        name: channel_identity(icon_url.as_str()),
        icon_url: String::from(icon_url),
        entries,
    })
}

/// Extracts every channel listing from an EPG template page.
///
/// Channel blocks are the `div` siblings of `#channels_1` whose id starts
/// with `channels_`. A page without `#channels_1` has no listings.
/// Logo URLs are resolved against `page_url`, the address the page was
/// fetched from.
///
/// # Errors
///
/// Returns an error if a channel block or program row lacks an expected
/// element.
pub fn parse_epg_html(html: &str, page_url: &Url) -> Result<Vec<ChannelListing>> {
    let document = Html::parse_document(html);

    let Some(first) = document.select(&FIRST_CHANNEL).next() else {
        tracing::debug!("No #channels_1 element in page");
        return Ok(Vec::new());
    };

    let Some(container) = first.parent().and_then(ElementRef::wrap) else {
        return parse_channel(first, page_url).map(|listing| vec![listing]);
    };

    child_elements(container, "div")
        .filter(|div| {
            div.value()
                .attr("id")
                .is_some_and(|id| id.starts_with(CHANNEL_ID_PREFIX))
        })
        .map(|block| parse_channel(block, page_url))
        .collect()
}
