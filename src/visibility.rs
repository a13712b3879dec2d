//! Annual visibility scan
//!
//! A target's Sun separation is sampled once per day over the reference
//! year (day 0 = 1 January plus the following 364 days). The daily
//! visibility signal is then compressed into contiguous `MMDD-MMDD`
//! ranges. A range whose start label is later than its end label wraps
//! across the end of the year.

use chrono::NaiveDate;
use ndarray::{s, Array1};
use serde::Serialize;
use std::fmt;

use crate::constraints::Mission;
use crate::utils::time_utils::format_mmdd;

/// Daily Sun-target separations over the reference year
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualTrack {
    /// Sampled dates, day 0 first
    pub days: Vec<NaiveDate>,
    /// Separation in degrees for each entry of `days`
    pub separations: Array1<f64>,
}

impl AnnualTrack {
    pub fn new(days: Vec<NaiveDate>, separations: Array1<f64>) -> Self {
        AnnualTrack { days, separations }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Per-day visibility for `mission`
    pub fn visibility_flags(&self, mission: Mission) -> Vec<bool> {
        self.separations.iter().map(|&sep| mission.allows(sep)).collect()
    }

    pub fn visibility(&self, mission: Mission) -> AnnualVisibility {
        compress_ranges(&self.days, &self.visibility_flags(mission))
    }

    /// Largest separation over days 1..=364; day 0 is not part of this scan.
    /// Returns -1 when there is nothing to scan.
    pub fn max_separation(&self) -> f64 {
        if self.separations.len() < 2 {
            return -1.0;
        }
        self.separations
            .slice(s![1..])
            .iter()
            .fold(-1.0_f64, |acc, &sep| acc.max(sep))
    }
}

/// One contiguous visible interval, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VisibilityRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        VisibilityRange { start, end }
    }

    /// True when the interval runs past 31 December into January
    pub fn wraps_year_end(&self) -> bool {
        self.start > self.end
    }

    pub fn start_label(&self) -> String {
        format_mmdd(self.start)
    }

    pub fn end_label(&self) -> String {
        format_mmdd(self.end)
    }
}

impl fmt::Display for VisibilityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_label(), self.end_label())
    }
}

/// Outcome of an annual scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "ranges", rename_all = "snake_case")]
pub enum AnnualVisibility {
    NotVisible,
    AllYear,
    Ranges(Vec<VisibilityRange>),
}

impl AnnualVisibility {
    pub fn ranges(&self) -> &[VisibilityRange] {
        match self {
            AnnualVisibility::Ranges(ranges) => ranges,
            _ => &[],
        }
    }
}

impl fmt::Display for AnnualVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnualVisibility::NotVisible => f.write_str("Not visible"),
            AnnualVisibility::AllYear => f.write_str("Visible all year"),
            AnnualVisibility::Ranges(ranges) => {
                let labels: Vec<String> = ranges.iter().map(|r| r.to_string()).collect();
                f.write_str(&labels.join(", "))
            }
        }
    }
}

/// Annual visibility of a named target for one mission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityReport {
    pub target: String,
    pub mission: Mission,
    pub visibility: AnnualVisibility,
}

impl fmt::Display for VisibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.target, self.visibility)
    }
}

/// Compress a daily visibility signal into ranges
///
/// `days[0]` gives the initial state. Leaving visibility on day `i` closes
/// the open range at `days[i - 1]`; if no range is open yet, that label
/// closes the range that wraps past the year end. Entering visibility on
/// day `i` opens a range at `days[i]`.
///
/// A signal that starts visible and never changes is `AllYear`. A range
/// still open at the end of a signal that started invisible is closed on
/// the last sampled day. If the signal started visible but the final
/// range was closed, the leading interval is reported as its own range.
pub fn compress_ranges(days: &[NaiveDate], flags: &[bool]) -> AnnualVisibility {
    let n = days.len().min(flags.len());
    let (days, flags) = (&days[..n], &flags[..n]);
    let (Some(&first_day), Some(&last_day), Some(&initial)) =
        (days.first(), days.last(), flags.first())
    else {
        return AnnualVisibility::NotVisible;
    };

    let mut ranges = Vec::new();
    let mut open: Option<NaiveDate> = None;
    let mut last_vis: Option<NaiveDate> = None;
    let mut prev = initial;

    for i in 1..n {
        let cur = flags[i];
        if cur == prev {
            continue;
        }
        if prev {
            let end = days[i - 1];
            match open.take() {
                Some(start) => ranges.push(VisibilityRange::new(start, end)),
                None => last_vis = Some(end),
            }
        } else {
            open = Some(days[i]);
        }
        prev = cur;
    }

    match (open, last_vis) {
        (None, None) if initial => return AnnualVisibility::AllYear,
        (Some(start), Some(end)) => ranges.push(VisibilityRange::new(start, end)),
        (Some(start), None) => ranges.push(VisibilityRange::new(start, last_day)),
        (None, Some(end)) => ranges.insert(0, VisibilityRange::new(first_day, end)),
        (None, None) => {}
    }

    if ranges.is_empty() {
        AnnualVisibility::NotVisible
    } else {
        AnnualVisibility::Ranges(ranges)
    }
}
