// Server-rendered views: search orchestration plus the two presentational pieces.

pub mod details;
pub mod histogram;
pub mod search;

use askama::Template;

/// Outer page shell around the search view.
#[derive(Template)]
#[template(path = "page.html")]
pub struct JobsPage<'a> {
    pub search: &'a str,
}
