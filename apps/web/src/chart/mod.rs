// Monthly histogram of job postings and the date handling it depends on.

pub mod dates;
pub mod histogram;

pub use histogram::{build_histogram, jobs_in_month, month_name, ChartData, MONTH_NAMES};
