use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::ValidationError;

/// `(range, interval)` pair sent to the chart endpoint as `TimeRange` and
/// `Interval`. Both values are passed through as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TimeRangeSelection {
    pub range: String,
    pub interval: String,
}

impl TimeRangeSelection {
    pub const DEFAULT_RANGE: &'static str = "180";
    pub const DEFAULT_INTERVAL: &'static str = "d";

    pub fn new(range: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            range: range.into(),
            interval: interval.into(),
        }
    }
}

/// 180 days of daily candles.
impl Default for TimeRangeSelection {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RANGE, Self::DEFAULT_INTERVAL)
    }
}

impl Display for TimeRangeSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.range, self.interval)
    }
}

/// Fixed time-range buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Max,
}

impl Preset {
    pub const ALL: [Self; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::Max,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Max => "max",
        }
    }

    pub const fn range(self) -> &'static str {
        match self {
            Self::Daily => "1",
            Self::Weekly => "5",
            Self::Monthly => "30",
            Self::Yearly => "365",
            Self::Max => "1825",
        }
    }

    pub const fn interval(self) -> &'static str {
        match self {
            Self::Daily => "5",
            Self::Weekly => "15",
            Self::Monthly => "240",
            Self::Yearly => "d",
            Self::Max => "w",
        }
    }

    pub fn selection(self) -> TimeRangeSelection {
        TimeRangeSelection::new(self.range(), self.interval())
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == normalized)
            .ok_or(ValidationError::UnknownPreset { value: normalized })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_map_to_fixed_range_and_interval() {
        let pairs = Preset::ALL
            .into_iter()
            .map(|preset| (preset.range(), preset.interval()))
            .collect::<Vec<_>>();

        assert_eq!(
            pairs,
            vec![
                ("1", "5"),
                ("5", "15"),
                ("30", "240"),
                ("365", "d"),
                ("1825", "w"),
            ]
        );
    }

    #[test]
    fn default_selection_is_180_days_daily() {
        let selection = TimeRangeSelection::default();
        assert_eq!(selection.range, "180");
        assert_eq!(selection.interval, "d");
    }

    #[test]
    fn parses_preset_names() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_str(preset.as_str()), Ok(preset));
        }
        assert_eq!(Preset::from_str(" Weekly "), Ok(Preset::Weekly));
    }

    #[test]
    fn rejects_unknown_preset() {
        let err = Preset::from_str("hourly").expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownPreset { .. }));
    }
}
