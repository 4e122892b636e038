//! Fixed-width listing timestamps (`YYYY-MM-DD HH:MM:SS`).

use std::fmt;

use chrono::NaiveDate;
use chrono::NaiveDateTime;

use crate::Error;
use crate::Result;

/// Length of the `YYYY-MM-DD HH:MM:SS` prefix.
const TIMESTAMP_LEN: usize = 19;

/// A timestamp as printed in a technical listing.
///
/// The archiver prints local calendar fields with no offset; they are kept
/// as-is. A leniently decoded value may hold zeros (and therefore not be a
/// valid date), which is why the fields are stored rather than a
/// [`NaiveDateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute, 0-59.
    pub minute: u32,
    /// Second, 0-59.
    pub second: u32,
}

impl Timestamp {
    /// Decodes a listing value, degrading unreadable components to zero.
    ///
    /// Returns `None` for an empty value. Characters after the 19-character
    /// prefix (fractional seconds printed by newer archivers) are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use p7wrap_core::Timestamp;
    ///
    /// let ts = Timestamp::parse_lenient("2023-05-01 12:30:45").unwrap();
    /// assert_eq!((ts.year, ts.month, ts.day), (2023, 5, 1));
    /// assert_eq!((ts.hour, ts.minute, ts.second), (12, 30, 45));
    ///
    /// assert!(Timestamp::parse_lenient("").is_none());
    /// ```
    #[must_use]
    pub fn parse_lenient(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }

        let field = |range: std::ops::Range<usize>| -> u32 {
            value.get(range).and_then(|s| s.parse().ok()).unwrap_or(0)
        };

        Some(Self {
            year: value.get(0..4).and_then(|s| s.parse().ok()).unwrap_or(0),
            month: field(5..7),
            day: field(8..10),
            hour: field(11..13),
            minute: field(14..16),
            second: field(17..19),
        })
    }

    /// Decodes a listing value, rejecting anything that is not a real
    /// `YYYY-MM-DD HH:MM:SS` date and time.
    ///
    /// Returns `Ok(None)` for an empty value. A fractional-seconds suffix
    /// (`.` followed by digits) is accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the value is not a valid timestamp.
    pub fn parse_strict(value: &str) -> Result<Option<Self>> {
        if value.is_empty() {
            return Ok(None);
        }

        let invalid = || Error::Parse(format!("invalid timestamp: {value:?}"));

        let prefix = value.get(..TIMESTAMP_LEN).ok_or_else(invalid)?;
        let suffix = &value[TIMESTAMP_LEN..];
        if !suffix.is_empty()
            && !(suffix.starts_with('.') && suffix[1..].bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(invalid());
        }

        let datetime =
            NaiveDateTime::parse_from_str(prefix, "%Y-%m-%d %H:%M:%S").map_err(|_| invalid())?;
        Ok(Some(Self::from(datetime)))
    }

    /// Converts to a [`NaiveDateTime`], or `None` if the fields do not form
    /// a valid date and time.
    #[must_use]
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        use chrono::Datelike;
        use chrono::Timelike;

        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
