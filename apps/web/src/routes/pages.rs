use axum::{
    extract::{Query, State},
    response::Html,
};
use askama::Template;
use serde::Deserialize;
use tracing::debug;

use crate::chart::MONTH_NAMES;
use crate::errors::AppError;
use crate::state::AppState;
use crate::views::search::SearchView;
use crate::views::JobsPage;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub q: String,
    /// Bar activated on the histogram, 0 = January. Checked by `selected_month`.
    #[serde(default)]
    pub month: Option<String>,
}

impl PageQuery {
    pub fn selected_month(&self) -> Result<Option<usize>, AppError> {
        let raw = match self.month.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };
        match raw.parse::<usize>() {
            Ok(month) if month < MONTH_NAMES.len() => Ok(Some(month)),
            _ => Err(AppError::Validation(format!(
                "month must be between 0 and 11, got {raw}"
            ))),
        }
    }
}

/// GET /
///
/// Builds a fresh search view per request: mount (or search `q`), apply the
/// histogram selection carried in `month`, render.
pub async fn handle_jobs_page(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let month = params.selected_month()?;

    let mut view = SearchView::new(state.jobs.clone(), state.log.clone());
    if params.q.is_empty() {
        view.mount().await;
    } else {
        view.search(&params.q).await;
    }

    if let Some(month) = month {
        view.select_month(month);
        debug!(
            month,
            phase = ?view.phase(),
            selected = view.selected_jobs().len(),
            "Histogram selection applied"
        );
    }

    let search = view.render()?;
    let page = JobsPage { search: &search };
    Ok(Html(page.render()?))
}
