//! Static channel display-name overrides.

use beinguide_epg::ChannelNameMapping;

/// Scraped channel identity to display name.
///
/// Identities are logo file names without their last three characters
/// (e.g. `"beinsports1."`). Empty unless edited here.
const CHANNEL_NAME_OVERRIDES: &[(&str, &str)] = &[];

/// Builds the display-name mapping from the static table.
#[must_use]
pub fn channel_name_mapping() -> ChannelNameMapping {
    CHANNEL_NAME_OVERRIDES.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_empty() {
        // Arrange & Act
        let mapping = channel_name_mapping();

        // Assert
        assert!(mapping.is_empty());
        assert_eq!(mapping.len(), CHANNEL_NAME_OVERRIDES.len());
    }
}
