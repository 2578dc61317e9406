//! Route registration and request-scoped middleware.

use crate::handlers::{admin, department, employee, health, report};
use crate::state::AppState;
use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

/// Tags every request with a `callid-<uuid>` span field and echoes it back
/// in the `x-call-id` header, so a client-reported id can be matched
/// against the logs.
async fn call_id(req: Request, next: Next) -> Response {
    let call_id = format!("callid-{}", Uuid::new_v4());
    let span = tracing::info_span!(
        "request",
        %call_id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&call_id) {
        response.headers_mut().insert("x-call-id", value);
    }
    response
}

/// The full application router: unversioned healthcheck at the root plus
/// the versioned API under /api/v1.
pub fn app(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/healthcheck", get(health::healthcheck))
        .route("/departments", get(department::list))
        .route(
            "/departments/:code",
            get(department::get).put(department::put).delete(department::delete),
        )
        .route("/departments/:code/employees", post(department::add_employee))
        .route("/employees", get(employee::list))
        .route("/employees/:id", get(employee::get).put(employee::update))
        .route(
            "/reports/departments/employees",
            get(report::departments_employees).post(report::departments_employees),
        )
        .route("/admin/bootstrap", post(admin::bootstrap));

    Router::new()
        .route("/healthcheck", get(health::healthcheck))
        .nest("/api/v1", v1)
        .layer(middleware::from_fn(call_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
