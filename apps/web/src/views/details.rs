//! Detail table for the jobs of one selected month. Pure rendering.

use askama::Template;

use crate::chart::dates::format_published;
use crate::chart::month_name;
use crate::jobs::JobRecord;

const HEADING_PREFIX: &str = "Job Details for";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow<'a> {
    pub title: &'a str,
    pub organization: &'a str,
    pub location: &'a str,
    /// `Mar 15, 2024`, or the raw value when it does not parse.
    pub published: String,
}

#[derive(Template)]
#[template(path = "details.html")]
struct DetailTableTemplate<'a> {
    heading: String,
    rows: Vec<DetailRow<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct DetailTable<'a> {
    jobs: &'a [JobRecord],
    month: Option<usize>,
}

impl<'a> DetailTable<'a> {
    pub fn new(jobs: &'a [JobRecord], month: Option<usize>) -> Self {
        Self { jobs, month }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// `Job Details for March`; with no (or an unknown) month the name is simply left off.
    pub fn heading(&self) -> String {
        match self.month.and_then(month_name) {
            Some(name) => format!("{HEADING_PREFIX} {name}"),
            None => HEADING_PREFIX.to_string(),
        }
    }

    pub fn rows(&self) -> Vec<DetailRow<'a>> {
        self.jobs
            .iter()
            .map(|job| DetailRow {
                title: &job.title,
                organization: &job.organization,
                location: &job.location,
                published: format_published(&job.date_published),
            })
            .collect()
    }

    /// Empty string when there are no jobs to show.
    pub fn render(&self) -> Result<String, askama::Error> {
        if self.is_empty() {
            return Ok(String::new());
        }

        DetailTableTemplate {
            heading: self.heading(),
            rows: self.rows(),
        }
        .render()
    }
}
