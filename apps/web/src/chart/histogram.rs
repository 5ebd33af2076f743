#![allow(dead_code)]

//! Histogram formatter — buckets job postings by calendar month of publication.

use serde::Serialize;
use serde_json::{json, Value};

use crate::chart::dates::published_month;
use crate::diagnostics::ErrorLog;
use crate::jobs::JobRecord;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const SERIES_LABEL: &str = "Number of Job Descriptions";
pub const SERIES_COLOR: &str = "#42b983";
pub const DATE_PARSE_ERROR: &str = "Error parsing date:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub label: &'static str,
    pub color: &'static str,
    /// Index-aligned with `ChartData::month_labels`.
    pub counts: [u32; 12],
}

/// Chart-ready histogram. Always exactly twelve months, in calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub month_labels: [&'static str; 12],
    pub series: Series,
}

impl ChartData {
    pub fn from_counts(counts: [u32; 12]) -> Self {
        Self {
            month_labels: MONTH_NAMES,
            series: Series {
                label: SERIES_LABEL,
                color: SERIES_COLOR,
                counts,
            },
        }
    }

    pub fn total(&self) -> u32 {
        self.series.counts.iter().sum()
    }

    pub fn max_count(&self) -> u32 {
        self.series.counts.iter().copied().max().unwrap_or(0)
    }

    /// Shape expected by bar-chart libraries: `{ labels, datasets: [...] }`.
    pub fn to_chart_js(&self) -> Value {
        json!({
            "labels": self.month_labels,
            "datasets": [{
                "label": self.series.label,
                "backgroundColor": self.series.color,
                "data": self.series.counts,
            }],
        })
    }
}

/// Counts jobs per publication month (UTC).
///
/// A job whose date does not parse is logged through `log` and left out of every
/// bucket; it never causes the call to fail.
pub fn build_histogram(jobs: &[JobRecord], log: &dyn ErrorLog) -> ChartData {
    let mut counts = [0u32; 12];

    for job in jobs {
        match published_month(&job.date_published) {
            Ok(month) => counts[month] += 1,
            Err(cause) => log.log_error(DATE_PARSE_ERROR, &[&job.date_published, &cause]),
        }
    }

    ChartData::from_counts(counts)
}

/// Jobs whose publish date falls in `month` (0 = January). Unparseable dates never match.
pub fn jobs_in_month(jobs: &[JobRecord], month: usize) -> Vec<JobRecord> {
    jobs.iter()
        .filter(|job| published_month(&job.date_published) == Ok(month))
        .cloned()
        .collect()
}

pub fn month_name(index: usize) -> Option<&'static str> {
    MONTH_NAMES.get(index).copied()
}
