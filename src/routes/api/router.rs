use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{members, public, tasks};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router())
        .merge(members::router(state.clone()))
        .merge(tasks::router(state))
}
