//! EPG template request parameters.

use chrono::{Datelike, NaiveDate};

/// Query parameters for the `epg_fetch` AJAX template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpgQuery {
    /// Channel category (`category`).
    pub category: String,
    /// Page language (`language`).
    pub language: String,
    /// Hour offset applied by the site (`offset`); `-3` yields UTC times.
    pub offset: i32,
    /// Service identity (`serviceidentity`).
    pub service_identity: String,
    /// Page post ID (`postid`).
    pub post_id: u32,
}

impl Default for EpgQuery {
    fn default() -> Self {
        Self {
            category: String::from("sports"),
            language: String::from("AR"),
            offset: -3,
            service_identity: String::from("bein.net"),
            post_id: 25_344,
        }
    }
}

impl EpgQuery {
    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the hour offset.
    #[must_use]
    pub const fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// Builds the query pairs for `date`.
    #[must_use]
    pub fn to_query(&self, date: NaiveDate) -> Vec<(&'static str, String)> {
        vec![
            ("action", String::from("epg_fetch")),
            ("offset", self.offset.to_string()),
            ("category", self.category.clone()),
            ("serviceidentity", self.service_identity.clone()),
            ("mins", String::from("00")),
            ("cdate", format_cdate(date)),
            ("language", self.language.clone()),
            ("postid", self.post_id.to_string()),
            ("loadindex", String::from("0")),
        ]
    }
}

/// Formats the `cdate` value without zero padding (e.g. `"2024-5-1"`).
fn format_cdate(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn lookup<'a>(query: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_query() {
        // Arrange
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        // Act
        let query = EpgQuery::default().to_query(date);

        // Assert
        assert_eq!(lookup(&query, "action"), Some("epg_fetch"));
        assert_eq!(lookup(&query, "offset"), Some("-3"));
        assert_eq!(lookup(&query, "category"), Some("sports"));
        assert_eq!(lookup(&query, "serviceidentity"), Some("bein.net"));
        assert_eq!(lookup(&query, "mins"), Some("00"));
        assert_eq!(lookup(&query, "cdate"), Some("2024-5-1"));
        assert_eq!(lookup(&query, "language"), Some("AR"));
        assert_eq!(lookup(&query, "postid"), Some("25344"));
        assert_eq!(lookup(&query, "loadindex"), Some("0"));
    }

    #[test]
    fn test_cdate_two_digit_parts() {
        // Arrange
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();

        // Act & Assert
        assert_eq!(format_cdate(date), "2024-12-25");
    }

    #[test]
    fn test_overrides() {
        // Arrange
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        // Act
        let query = EpgQuery::default()
            .category("entertainment")
            .language("EN")
            .offset(0)
            .to_query(date);

        // Assert
        assert_eq!(lookup(&query, "category"), Some("entertainment"));
        assert_eq!(lookup(&query, "language"), Some("EN"));
        assert_eq!(lookup(&query, "offset"), Some("0"));
    }
}
