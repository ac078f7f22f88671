//! Schedule source seam and the day-by-day collection loop.
#![allow(clippy::future_not_send)]

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use tracing::instrument;

use crate::guide::Guide;

/// One program row as scraped, before its time range is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Program title.
    pub title: String,
    /// Program description.
    pub description: String,
    /// Clock range text, e.g. `"23:00 - 01:00"`.
    pub time_range: String,
}

/// A channel's listing for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelListing {
    /// Channel identity.
    pub name: String,
    /// Channel logo URL.
    pub icon_url: String,
    /// Program rows in page order.
    pub entries: Vec<RawEntry>,
}

/// Source of per-day channel listings.
///
/// Abstracts the site-driving session for substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(ScheduleSource: Send)]
pub trait LocalScheduleSource {
    /// Fetches every channel listing published for `date`.
    ///
    /// An empty vector means the site has nothing for that date.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be reached or its response
    /// cannot be read.
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<ChannelListing>>;
}

/// Fetches `days` consecutive days starting at `start` and merges them
/// into a fresh guide.
///
/// Days are fetched strictly one after another. A day with no listings
/// is logged and skipped.
///
/// # Errors
///
/// Returns an error if the source fails for any day, a listing has a
/// malformed time range, or the date range overflows.
#[instrument(skip_all, fields(%start, days))]
pub async fn collect_guide(
    source: &impl LocalScheduleSource,
    start: NaiveDate,
    days: u32,
) -> Result<Guide> {
    let mut guide = Guide::new();

    for offset in 0..days {
        let date = start
            .checked_add_days(Days::new(u64::from(offset)))
            .with_context(|| format!("date overflow at {start} + {offset} days"))?;
        tracing::info!("Getting channels for {}", date.format("%y/%m/%d"));

        let listings = source
            .fetch_day(date)
            .await
            .with_context(|| format!("failed to fetch listings for {date}"))?;

        if listings.is_empty() {
            tracing::warn!(%date, "No channel found");
            continue;
        }

        for listing in &listings {
            guide
                .ingest(&listing.name, &listing.icon_url, date, &listing.entries)
                .with_context(|| format!("invalid listing for {} on {date}", listing.name))?;
        }
    }

    tracing::info!(
        channels = guide.len(),
        programs = guide.program_count(),
        "Guide collection completed"
    );

    Ok(guide)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;
    use std::sync::Mutex;

    use anyhow::bail;
    use tracing::Level;
    use tracing_mock::{expect, subscriber};

    use super::*;
    use crate::guide::{Channel, Program};

    /// In-memory source returning pre-configured listings per date.
    struct MockSource {
        days: HashMap<NaiveDate, Vec<ChannelListing>>,
        failing: Option<NaiveDate>,
        requested: Mutex<Vec<NaiveDate>>,
    }

    impl MockSource {
        fn new(days: Vec<(NaiveDate, Vec<ChannelListing>)>) -> Self {
            Self {
                days: days.into_iter().collect(),
                failing: None,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<NaiveDate> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl LocalScheduleSource for MockSource {
        async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<ChannelListing>> {
            self.requested.lock().unwrap().push(date);
            if self.failing == Some(date) {
                bail!("session closed");
            }
            Ok(self.days.get(&date).cloned().unwrap_or_default())
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn listing(name: &str, entries: &[(&str, &str)]) -> ChannelListing {
        ChannelListing {
            name: String::from(name),
            icon_url: format!("https://example.com/{name}.png"),
            entries: entries
                .iter()
                .map(|(title, time_range)| RawEntry {
                    title: String::from(*title),
                    description: format!("{title} desc"),
                    time_range: String::from(*time_range),
                })
                .collect(),
        }
    }

    fn titles(channel: &Channel) -> Vec<&str> {
        channel.programs().iter().map(Program::title).collect()
    }

    #[tokio::test]
    async fn test_collect_guide_merges_days() {
        // Arrange
        let source = MockSource::new(vec![
            (
                date(1),
                vec![listing("ch1", &[("A", "23:00 - 01:00"), ("B", "08:00 - 09:00")])],
            ),
            (date(2), vec![listing("ch1", &[("C", "22:00 - 23:30")])]),
        ]);

        // Act
        let guide = collect_guide(&source, date(1), 2).await.unwrap();

        // Assert
        assert_eq!(guide.len(), 1);
        assert_eq!(titles(guide.get("ch1").unwrap()), vec!["B", "C"]);
        assert_eq!(source.requested(), vec![date(1), date(2)]);
    }

    #[tokio::test]
    async fn test_collect_guide_skips_empty_days() {
        // Arrange
        let source = MockSource::new(vec![(
            date(3),
            vec![
                listing("ch1", &[("A", "10:00 - 11:00")]),
                listing("ch2", &[("B", "12:00 - 13:00")]),
            ],
        )]);

        // Act
        let guide = collect_guide(&source, date(1), 3).await.unwrap();

        // Assert
        assert_eq!(source.requested(), vec![date(1), date(2), date(3)]);
        assert_eq!(guide.len(), 2);
        assert_eq!(guide.program_count(), 2);
    }

    #[tokio::test]
    async fn test_collect_guide_warns_on_empty_days() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .with_filter(|meta| meta.is_event() && *meta.level() == Level::WARN)
            .event(
                expect::event()
                    .at_level(Level::WARN)
                    .with_fields(expect::msg("No channel found")),
            )
            .event(
                expect::event()
                    .at_level(Level::WARN)
                    .with_fields(expect::msg("No channel found")),
            )
            .only()
            .run_with_handle();
        let source = MockSource::new(vec![(
            date(2),
            vec![listing("ch1", &[("A", "10:00 - 11:00")])],
        )]);

        // Act
        let guide = {
            let _guard = tracing::subscriber::set_default(subscriber);
            collect_guide(&source, date(1), 3).await.unwrap()
        };

        // Assert
        handle.assert_finished();
        assert_eq!(guide.program_count(), 1);
        assert_eq!(source.requested(), vec![date(1), date(2), date(3)]);
    }

    #[tokio::test]
    async fn test_collect_guide_zero_days() {
        // Arrange
        let source = MockSource::new(vec![]);

        // Act
        let guide = collect_guide(&source, date(1), 0).await.unwrap();

        // Assert
        assert!(guide.is_empty());
        assert!(source.requested().is_empty());
    }

    #[tokio::test]
    async fn test_collect_guide_source_failure_is_fatal() {
        // Arrange
        let mut source = MockSource::new(vec![(
            date(1),
            vec![listing("ch1", &[("A", "10:00 - 11:00")])],
        )]);
        source.failing = Some(date(2));

        // Act
        let result = collect_guide(&source, date(1), 3).await;

        // Assert
        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to fetch listings for 2024-05-02"));
        assert_eq!(source.requested(), vec![date(1), date(2)]);
    }

    #[tokio::test]
    async fn test_collect_guide_malformed_entry_is_fatal() {
        // Arrange
        let source = MockSource::new(vec![(
            date(1),
            vec![listing("ch1", &[("A", "10h00 - 11h00")])],
        )]);

        // Act
        let result = collect_guide(&source, date(1), 1).await;

        // Assert
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid listing for ch1"));
        assert!(
            err.chain()
                .any(|cause| cause.to_string().contains("malformed time range"))
        );
    }
}
