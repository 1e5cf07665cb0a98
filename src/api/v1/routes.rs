/*
 * Responsibility
 * - URL layout of v1
 * - Which routes sit behind the anti-forgery gate (everything except /health)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    health::health,
    submissions::{create_submission, gate_status},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let gated = Router::new().route("/submissions", get(gate_status).post(create_submission));
    let gated = middleware::antiforgery::apply(gated, state);

    Router::new().route("/health", get(health)).merge(gated)
}
