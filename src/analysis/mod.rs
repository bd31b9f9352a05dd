use crate::state::AppState;
use axum::Router;

pub mod analyzer;
pub mod dto;
pub mod handlers;

pub use analyzer::{MockAnalyzer, SiteAnalyzer};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::analyze_routes())
}
