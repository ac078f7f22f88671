//! Channel registry and per-day program ingestion.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::interval::{TimeInterval, TimeRangeError};
use crate::names::ChannelNameMapping;
use crate::source::RawEntry;

/// A scheduled program on one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    title: String,
    description: String,
    interval: TimeInterval,
}

impl Program {
    /// Creates a program.
    #[must_use]
    pub const fn new(title: String, description: String, interval: TimeInterval) -> Self {
        Self {
            title,
            description,
            interval,
        }
    }

    /// Resolves a raw scraped entry against the listing's date.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry's time range cannot be parsed.
    pub fn from_entry(entry: &RawEntry, date: NaiveDate) -> Result<Self, TimeRangeError> {
        let interval = TimeInterval::parse(date, &entry.time_range)?;
        Ok(Self::new(
            entry.title.clone(),
            entry.description.clone(),
            interval,
        ))
    }

    /// Program title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Program description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Airing interval.
    #[must_use]
    pub const fn interval(&self) -> &TimeInterval {
        &self.interval
    }
}

/// A channel seen during the scrape, with its programs in scrape order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    name: String,
    icon_url: String,
    programs: Vec<Program>,
}

impl Channel {
    /// Creates a channel with no programs.
    #[must_use]
    pub const fn new(name: String, icon_url: String) -> Self {
        Self {
            name,
            icon_url,
            programs: Vec::new(),
        }
    }

    /// Channel identity.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Icon URL from the first sighting.
    #[must_use]
    pub fn icon_url(&self) -> &str {
        &self.icon_url
    }

    /// Programs in scrape order.
    #[must_use]
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// Display name: the mapped override, or the identity itself.
    #[must_use]
    pub fn display_name<'a>(&'a self, names: &'a ChannelNameMapping) -> &'a str {
        names.get(&self.name).unwrap_or(self.name.as_str())
    }
}

/// Keeps everything after the leading run of rollover programs.
///
/// The site repeats the tail of the previous night at the head of each
/// day's listing; once a non-rollover program is seen, every later
/// program is kept even if it rolls over itself.
fn skip_rollover_prefix(programs: Vec<Program>) -> Vec<Program> {
    programs
        .into_iter()
        .skip_while(|p| p.interval().day_overlap())
        .collect()
}

/// Insertion-ordered channel registry built across all fetched days.
#[derive(Debug, Clone, Default)]
pub struct Guide {
    channels: IndexMap<String, Channel>,
}

impl Guide {
    /// Creates an empty guide.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one channel's listing for `date` into the guide.
    ///
    /// The channel is created on first sighting; later calls keep the
    /// first icon URL. Entries are resolved in order, the leading rollover
    /// run is dropped and the rest is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry has a malformed time range. The guide
    /// is left unchanged in that case.
    pub fn ingest(
        &mut self,
        identity: &str,
        icon_url: &str,
        date: NaiveDate,
        entries: &[RawEntry],
    ) -> Result<&Channel, TimeRangeError> {
        let resolved = entries
            .iter()
            .map(|entry| Program::from_entry(entry, date))
            .collect::<Result<Vec<_>, _>>()?;
        let admitted = skip_rollover_prefix(resolved);

        let channel = match self.channels.entry(String::from(identity)) {
            indexmap::map::Entry::Occupied(slot) => {
                tracing::info!("Existing channel: {identity}");
                slot.into_mut()
            }
            indexmap::map::Entry::Vacant(slot) => {
                tracing::info!("New channel: {identity}");
                slot.insert(Channel::new(String::from(identity), String::from(icon_url)))
            }
        };

        tracing::info!(
            channel = %identity,
            skipped = entries.len().saturating_sub(admitted.len()),
            "Found {} new programs",
            admitted.len()
        );
        channel.programs.extend(admitted);

        Ok(channel)
    }

    /// Looks up a channel by identity.
    #[must_use]
    pub fn get(&self, identity: &str) -> Option<&Channel> {
        self.channels.get(identity)
    }

    /// Channels in first-seen order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Number of channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Total number of programs across all channels.
    #[must_use]
    pub fn program_count(&self) -> usize {
        self.channels.values().map(|c| c.programs.len()).sum()
    }
}
