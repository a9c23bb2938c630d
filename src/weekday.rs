use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Day of the week, labelled the way the CLI and serde render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    #[display(fmt = "mon")]
    Mon,
    #[display(fmt = "tue")]
    Tue,
    #[display(fmt = "wed")]
    Wed,
    #[display(fmt = "thu")]
    Thu,
    #[display(fmt = "fri")]
    Fri,
    #[display(fmt = "sat")]
    Sat,
    #[display(fmt = "sun")]
    Sun,
}

impl Weekday {
    /// Monday-first ordering used by `from_monday_index`
    pub const ALL: [Self; 7] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];

    /// Maps 0 to Monday through 6 to Sunday.
    pub const fn from_monday_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::ALL.len() {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Saturday and Sunday
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Sat | Self::Sun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let labels: Vec<String> = Weekday::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["mon", "tue", "wed", "thu", "fri", "sat", "sun"]);
    }

    #[test]
    fn test_weekend_membership() {
        let weekend: Vec<Weekday> = Weekday::ALL.into_iter().filter(|d| d.is_weekend()).collect();
        assert_eq!(weekend, [Weekday::Sat, Weekday::Sun]);
    }

    #[test]
    fn test_from_monday_index() {
        assert_eq!(Weekday::from_monday_index(0), Some(Weekday::Mon));
        assert_eq!(Weekday::from_monday_index(5), Some(Weekday::Sat));
        assert_eq!(Weekday::from_monday_index(6), Some(Weekday::Sun));
        assert_eq!(Weekday::from_monday_index(7), None);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Weekday::Sat).expect("serialize weekday");
        assert_eq!(json, r#""sat""#);

        let parsed: Weekday = serde_json::from_str(r#""sun""#).expect("deserialize weekday");
        assert_eq!(parsed, Weekday::Sun);
    }
}
