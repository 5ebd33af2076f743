#![allow(dead_code)]

//! Search view — owns the job list and month selection for one page and
//! coordinates lookup, histogram and detail table.
//!
//! Derived state (the chart) is recomputed explicitly on every job-list write.

use std::sync::Arc;

use askama::Template;
use tracing::{debug, info};

use crate::api::FetchError;
use crate::chart::{build_histogram, ChartData};
use crate::diagnostics::ErrorLog;
use crate::jobs::{JobRecord, JobSource, Searches};
use crate::views::details::DetailTable;
use crate::views::histogram::{HistogramView, SelectionEvent};

pub const SEARCH_FAILED: &str = "Failed to search jobs:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Identifies one search started with `begin_search`; only the latest is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Template)]
#[template(path = "search.html")]
struct SearchTemplate<'a> {
    query: &'a str,
    histogram: String,
    jobs_json: String,
    details: String,
}

pub struct SearchView {
    source: Arc<dyn JobSource>,
    log: Arc<dyn ErrorLog>,
    query: String,
    phase: SearchPhase,
    jobs: Searches,
    chart: ChartData,
    selected_month: Option<usize>,
    selected_jobs: Vec<JobRecord>,
    generation: u64,
}

impl SearchView {
    pub fn new(source: Arc<dyn JobSource>, log: Arc<dyn ErrorLog>) -> Self {
        let chart = build_histogram(&[], log.as_ref());
        Self {
            source,
            log,
            query: String::new(),
            phase: SearchPhase::Idle,
            jobs: Searches::List(Vec::new()),
            chart,
            selected_month: None,
            selected_jobs: Vec::new(),
            generation: 0,
        }
    }

    /// Initial load with an empty query.
    pub async fn mount(&mut self) {
        self.search("").await;
    }

    pub async fn search(&mut self, query: &str) {
        let ticket = self.begin_search(query);
        let result = self.source.search_jobs(Some(query)).await;
        self.finish_search(ticket, result);
    }

    /// Moves to `Loading` and clears the selection. The returned ticket must be
    /// handed to `finish_search` with the lookup result.
    pub fn begin_search(&mut self, query: &str) -> SearchTicket {
        self.generation += 1;
        self.query = query.to_string();
        self.phase = SearchPhase::Loading;
        self.clear_selection();
        debug!(query = %self.query, generation = self.generation, "Search started");
        SearchTicket(self.generation)
    }

    /// Applies a lookup result. Returns `false`, leaving state untouched, when a
    /// newer search has started since `ticket` was issued.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Searches, FetchError>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(
                stale = ticket.0,
                current = self.generation,
                "Discarding stale search result"
            );
            return false;
        }

        match result {
            Ok(jobs) => {
                if !jobs.is_list() {
                    debug!(searches = ?jobs, "Search response carried no job list");
                }
                self.set_jobs(jobs);
                self.phase = SearchPhase::Loaded;
                info!(
                    query = %self.query,
                    jobs = self.jobs.as_slice().len(),
                    charted = self.chart.total(),
                    "Search loaded"
                );
            }
            Err(err) => {
                self.log.log_error(SEARCH_FAILED, &[&err]);
                self.set_jobs(Searches::List(Vec::new()));
                self.phase = SearchPhase::Errored;
            }
        }
        true
    }

    fn set_jobs(&mut self, jobs: Searches) {
        self.jobs = jobs;
        self.chart = build_histogram(self.jobs.as_slice(), self.log.as_ref());
    }

    pub fn on_histogram_select(&mut self, event: SelectionEvent) {
        self.selected_month = Some(event.month_index);
        self.selected_jobs = event.jobs;
    }

    /// Activates the bar for `month_index`. Returns `false` if there is no such bar.
    pub fn select_month(&mut self, month_index: usize) -> bool {
        let event = self.histogram().activate(month_index);
        match event {
            Some(event) => {
                self.on_histogram_select(event);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_month = None;
        self.selected_jobs.clear();
    }

    pub fn histogram(&self) -> HistogramView<'_> {
        HistogramView::with_chart(self.jobs.as_slice(), self.selected_month, &self.chart)
    }

    pub fn details(&self) -> DetailTable<'_> {
        DetailTable::new(&self.selected_jobs, self.selected_month)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn jobs(&self) -> &Searches {
        &self.jobs
    }

    pub fn chart(&self) -> &ChartData {
        &self.chart
    }

    pub fn selected_month(&self) -> Option<usize> {
        self.selected_month
    }

    pub fn selected_jobs(&self) -> &[JobRecord] {
        &self.selected_jobs
    }

    /// The job list as pretty JSON; empty when the server sent no list.
    pub fn jobs_json(&self) -> String {
        match &self.jobs {
            Searches::List(jobs) => serde_json::to_string_pretty(jobs).unwrap_or_default(),
            Searches::Null | Searches::Missing => String::new(),
        }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        SearchTemplate {
            query: &self.query,
            histogram: self.histogram().render(&self.query)?,
            jobs_json: self.jobs_json(),
            details: self.details().render()?,
        }
        .render()
    }
}
