//! Feed locator: date-stamped resource names for daily snapshots, and the reverse parse.

use chrono::{Datelike, Local, NaiveDate, Utc};
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_PREFIX: &str = "Refurbed_";
const EXTENSION: &str = ".json";

/// How the snapshot date is spelled in the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    Iso,
    /// `YYMMDD`
    Compact,
}

impl DateFormat {
    /// Zone whose calendar date counts as "today" unless configured otherwise.
    pub fn default_clock(self) -> Clock {
        match self {
            DateFormat::Iso => Clock::Utc,
            DateFormat::Compact => Clock::Local,
        }
    }

    /// Render `date` with fixed-width, zero-padded fields.
    pub fn stamp(self, date: NaiveDate) -> String {
        match self {
            DateFormat::Iso => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month(),
                date.day()
            ),
            DateFormat::Compact => format!(
                "{:02}{:02}{:02}",
                date.year().rem_euclid(100),
                date.month(),
                date.day()
            ),
        }
    }

    /// Parse a stamp produced by [`DateFormat::stamp`]. Compact years map to 2000-2099.
    pub fn parse_stamp(self, stamp: &str) -> Option<NaiveDate> {
        if !stamp.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
            return None;
        }
        match self {
            DateFormat::Iso => {
                let b = stamp.as_bytes();
                if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
                    return None;
                }
                let digits_only = b
                    .iter()
                    .enumerate()
                    .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
                if !digits_only {
                    return None;
                }
                NaiveDate::from_ymd_opt(
                    stamp[0..4].parse().ok()?,
                    stamp[5..7].parse().ok()?,
                    stamp[8..10].parse().ok()?,
                )
            }
            DateFormat::Compact => {
                if stamp.len() != 6 || stamp.contains('-') {
                    return None;
                }
                let yy: i32 = stamp[0..2].parse().ok()?;
                NaiveDate::from_ymd_opt(
                    2000 + yy,
                    stamp[2..4].parse().ok()?,
                    stamp[4..6].parse().ok()?,
                )
            }
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateFormat::Iso => "iso",
            DateFormat::Compact => "compact",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    Local,
    Utc,
}

impl Clock {
    pub fn today(self) -> NaiveDate {
        match self {
            Clock::Local => Local::now().date_naive(),
            Clock::Utc => Utc::now().date_naive(),
        }
    }
}

/// Computes `{base}{prefix}{stamp}.json` for a given date.
#[derive(Debug, Clone)]
pub struct FeedLocator {
    pub base: String,
    pub prefix: String,
    pub format: DateFormat,
}

impl FeedLocator {
    pub fn new(base: impl Into<String>, prefix: impl Into<String>, format: DateFormat) -> Self {
        Self {
            base: base.into(),
            prefix: prefix.into(),
            format,
        }
    }

    /// File name without the base path.
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}{}{}", self.prefix, self.format.stamp(date), EXTENSION)
    }

    /// Resource id for `date`. The base is prepended verbatim (it carries its own trailing separator).
    pub fn resource_for(&self, date: NaiveDate) -> String {
        format!("{}{}", self.base, self.file_name(date))
    }

    /// Recover the snapshot date from a file name in either format, if it carries our prefix.
    pub fn date_of(&self, file_name: &str) -> Option<NaiveDate> {
        let stamp = file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(EXTENSION)?;
        DateFormat::Iso
            .parse_stamp(stamp)
            .or_else(|| DateFormat::Compact.parse_stamp(stamp))
    }
}
