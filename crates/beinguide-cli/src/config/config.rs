//! `GuideConfig` run settings.

use std::path::PathBuf;

use beinguide_epg::ChannelNameMapping;
use chrono::NaiveDate;

use super::names::channel_name_mapping;

/// Default number of days to fetch.
pub const DEFAULT_DAYS: u32 = 3;

/// Settings for one run, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideConfig {
    /// Destination of the XMLTV file.
    pub output_path: PathBuf,
    /// Number of consecutive days to fetch.
    pub days: u32,
    /// First day to fetch.
    pub start_date: NaiveDate,
    /// Channel display-name overrides.
    pub names: ChannelNameMapping,
    /// User-Agent sent to the EPG site.
    pub user_agent: String,
}

impl GuideConfig {
    /// Creates a config with the static name table and default User-Agent.
    #[must_use]
    pub fn new(output_path: PathBuf, days: u32, start_date: NaiveDate) -> Self {
        Self {
            output_path,
            days,
            start_date,
            names: channel_name_mapping(),
            user_agent: String::from(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        }
    }

    /// Overrides the display-name table.
    #[cfg(test)]
    #[must_use]
    pub fn with_names(mut self, names: ChannelNameMapping) -> Self {
        self.names = names;
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_new_config() {
        // Arrange
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        // Act
        let config = GuideConfig::new(PathBuf::from("guide.xmltv"), DEFAULT_DAYS, start);

        // Assert
        assert_eq!(config.output_path, PathBuf::from("guide.xmltv"));
        assert_eq!(config.days, 3);
        assert_eq!(config.start_date, start);
        assert!(config.names.is_empty());
        assert!(config.user_agent.starts_with("beinguide-cli/"));
    }

    #[test]
    fn test_with_names() {
        // Arrange
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let names = ChannelNameMapping::new().with("ch1", "Channel One");

        // Act
        let config = GuideConfig::new(PathBuf::from("out.xml"), 1, start).with_names(names);

        // Assert
        assert_eq!(config.names.get("ch1"), Some("Channel One"));
    }
}
