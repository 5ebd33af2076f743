//! Bar chart over the monthly histogram. Activating a bar yields the jobs of that month.

use std::borrow::Cow;

use askama::Template;
use url::form_urlencoded;

use crate::chart::{jobs_in_month, ChartData};
use crate::jobs::JobRecord;

/// Emitted when a bar is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub month_index: usize,
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Clone)]
struct Bar {
    index: usize,
    label: &'static str,
    count: u32,
    height_pct: u32,
    selected: bool,
    href: String,
}

#[derive(Template)]
#[template(path = "histogram.html")]
struct HistogramTemplate<'a> {
    bars: Vec<Bar>,
    color: &'a str,
    legend: &'a str,
    chart_json: String,
}

pub struct HistogramView<'a> {
    jobs: &'a [JobRecord],
    selected: Option<usize>,
    chart: Cow<'a, ChartData>,
}

impl<'a> HistogramView<'a> {
    /// Reuses a chart already computed for exactly these `jobs`.
    pub fn with_chart(jobs: &'a [JobRecord], selected: Option<usize>, chart: &'a ChartData) -> Self {
        Self {
            jobs,
            selected,
            chart: Cow::Borrowed(chart),
        }
    }

    /// `None` for an index outside the twelve bars.
    pub fn activate(&self, month_index: usize) -> Option<SelectionEvent> {
        if month_index >= self.chart.month_labels.len() {
            return None;
        }
        Some(SelectionEvent {
            month_index,
            jobs: jobs_in_month(self.jobs, month_index),
        })
    }

    /// Bars link back to the page with `month` set, carrying the current query along.
    pub fn render(&self, query: &str) -> Result<String, askama::Error> {
        let max = self.chart.max_count().max(1);
        let bars = self
            .chart
            .month_labels
            .iter()
            .copied()
            .zip(self.chart.series.counts)
            .enumerate()
            .map(|(index, (label, count))| Bar {
                index,
                label,
                count,
                height_pct: count * 100 / max,
                selected: self.selected == Some(index),
                href: selection_href(query, index),
            })
            .collect();

        HistogramTemplate {
            bars,
            color: self.chart.series.color,
            legend: self.chart.series.label,
            chart_json: self.chart.to_chart_js().to_string(),
        }
        .render()
    }
}

#[cfg(test)]
impl<'a> HistogramView<'a> {
    /// Computes the chart for `jobs`; unparseable dates are reported to `log`.
    pub fn new(
        jobs: &'a [JobRecord],
        selected: Option<usize>,
        log: &dyn crate::diagnostics::ErrorLog,
    ) -> Self {
        Self {
            jobs,
            selected,
            chart: Cow::Owned(crate::chart::build_histogram(jobs, log)),
        }
    }

    pub fn chart(&self) -> &ChartData {
        &self.chart
    }
}

fn selection_href(query: &str, month_index: usize) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    if !query.is_empty() {
        params.append_pair("q", query);
    }
    params.append_pair("month", &month_index.to_string());
    format!("/?{}", params.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::testing::RecordingLog;
    use crate::jobs::testing::job;

    fn sample_jobs() -> Vec<JobRecord> {
        vec![
            job("Frontend Developer", "2024-01-15"),
            job("Backend Engineer", "2024-02-20"),
            job("Data Engineer", "2024-01-28"),
            job("Broken", "invalid-date"),
        ]
    }

    #[test]
    fn test_new_computes_chart() {
        let jobs = sample_jobs();
        let log = RecordingLog::default();
        let view = HistogramView::new(&jobs, None, &log);
        assert_eq!(view.chart().series.counts[0], 2);
        assert_eq!(view.chart().series.counts[1], 1);
        assert_eq!(view.chart().total(), 3);
        assert_eq!(log.count(), 1);
    }

    #[test]
    fn test_activate_emits_jobs_of_month() {
        let jobs = sample_jobs();
        let view = HistogramView::new(&jobs, None, &RecordingLog::default());
        let event = view.activate(0).unwrap();
        assert_eq!(event.month_index, 0);
        let titles: Vec<&str> = event.jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Frontend Developer", "Data Engineer"]);
    }

    #[test]
    fn test_activate_empty_month() {
        let jobs = sample_jobs();
        let view = HistogramView::new(&jobs, None, &RecordingLog::default());
        let event = view.activate(6).unwrap();
        assert!(event.jobs.is_empty());
    }

    #[test]
    fn test_activate_out_of_range() {
        let jobs = sample_jobs();
        let view = HistogramView::new(&jobs, None, &RecordingLog::default());
        assert!(view.activate(12).is_none());
    }

    #[test]
    fn test_with_chart_does_not_recompute() {
        let jobs = sample_jobs();
        let chart = ChartData::from_counts([9; 12]);
        let view = HistogramView::with_chart(&jobs, Some(3), &chart);
        assert_eq!(view.chart().series.counts, [9; 12]);
    }

    #[test]
    fn test_render_has_twelve_bars() {
        let jobs = sample_jobs();
        let view = HistogramView::new(&jobs, Some(1), &RecordingLog::default());
        let html = view.render("rust dev").unwrap();
        assert_eq!(html.matches("data-month=").count(), 12);
        assert_eq!(html.matches("bar selected").count(), 1);
        assert!(html.contains("?q=rust+dev&amp;month=1\""));
        assert!(html.contains("height: 100%"));
        assert!(html.contains("Number of Job Descriptions"));
        assert!(html.contains(r##""backgroundColor":"#42b983""##));
    }

    #[test]
    fn test_render_empty_chart() {
        let view = HistogramView::new(&[], None, &RecordingLog::default());
        let html = view.render("").unwrap();
        assert_eq!(html.matches("data-month=").count(), 12);
        assert!(html.contains("?month=0\""));
        assert!(!html.contains("bar selected"));
    }

    #[test]
    fn test_selection_href() {
        assert_eq!(selection_href("", 4), "/?month=4");
        assert_eq!(selection_href("c++ & go", 0), "/?q=c%2B%2B+%26+go&month=0");
    }
}
