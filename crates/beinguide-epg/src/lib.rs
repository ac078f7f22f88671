//! Program guide model for beinguide.
//!
//! Resolves scraped clock ranges, merges per-day channel listings into a
//! single guide and renders it as XMLTV.

/// Channel registry and per-day ingestion.
pub mod guide;
/// Clock range parsing and timestamps.
pub mod interval;
/// Display-name overrides.
pub mod names;
/// Schedule source trait and collection loop.
pub mod source;
/// XMLTV export.
pub mod xmltv;

pub use guide::{Channel, Guide, Program};
pub use interval::{TimeInterval, TimeRangeError};
pub use names::ChannelNameMapping;
#[allow(clippy::module_name_repetitions)]
pub use source::{ChannelListing, LocalScheduleSource, RawEntry, ScheduleSource, collect_guide};
pub use xmltv::{render_guide, write_guide};
