use axum::response::Response;

use crate::response::ok;
use crate::seed;

pub async fn list() -> Response {
    ok(seed::all_categories())
}
