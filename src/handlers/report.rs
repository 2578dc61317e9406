//! Report routes.

use crate::error::AppError;
use crate::handlers::department::DepartmentResponse;
use crate::handlers::employee::EmployeeResponse;
use crate::service::EmployeeReportService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use std::collections::HashMap;

fn required_int(params: &HashMap<String, String>, name: &'static str) -> Result<i32, AppError> {
    let raw = params.get(name).ok_or(AppError::MissingArgument(name))?;
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("{} must be an integer", name)))
}

/// Departments of one country with their employees in an inclusive age
/// range. All three query arguments are validated before any database
/// access happens.
pub async fn departments_employees(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<DepartmentResponse>>, AppError> {
    let country_code = params
        .get("country-code")
        .ok_or(AppError::MissingArgument("country-code"))?
        .clone();
    let lower_age = required_int(&params, "lower-age")?;
    let upper_age = required_int(&params, "upper-age")?;

    let mut tx = state.pool.begin().await?;
    let report =
        EmployeeReportService::employees_by_department(&mut tx, &country_code, lower_age, upper_age)
            .await?;
    tx.commit().await?;

    let body = report
        .into_iter()
        .map(|(department, employees)| {
            let mut response = DepartmentResponse::from_entity(department);
            response.employees =
                Some(employees.into_iter().map(EmployeeResponse::from_entity).collect());
            response
        })
        .collect();
    Ok(Json(body))
}
