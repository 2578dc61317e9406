//! Department routes, plus employee creation scoped to a department.

use crate::dao::{DepartmentDao, EmployeeDao};
use crate::error::AppError;
use crate::handlers::employee::{AddEmployeeRequest, EmployeeResponse};
use crate::model::{Department, NewDepartment};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of PUT /departments/{code}. The code is the resource path, so the
/// payload deliberately has no code field; the caller names the primary key
/// in the URI, which is why this is a PUT and not a POST.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrUpdateDepartmentRequest {
    pub name: String,
    pub country_code: String,
    pub city: String,
    #[serde(default, rename = "notes")]
    pub comments: Option<String>,
}

impl AddOrUpdateDepartmentRequest {
    pub fn into_entity(self, code: String) -> NewDepartment {
        NewDepartment {
            code,
            name: self.name,
            country_code: self.country_code,
            city: self.city,
            comments: self.comments,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub city: String,
    #[serde(rename = "notes")]
    pub comments: Option<String>,
    pub date_created: DateTime<Utc>,
    /// Only present on report responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<EmployeeResponse>>,
}

impl DepartmentResponse {
    pub fn from_entity(entity: Department) -> Self {
        Self {
            code: entity.code,
            name: entity.name,
            country_code: entity.country_code,
            city: entity.city,
            comments: entity.comments,
            date_created: entity.date_created,
            employees: None,
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<DepartmentResponse>>, AppError> {
    let mut tx = state.pool.begin().await?;
    let departments = DepartmentDao::query_all(&mut tx).await?;
    tx.commit().await?;
    Ok(Json(
        departments.into_iter().map(DepartmentResponse::from_entity).collect(),
    ))
}

pub async fn get(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DepartmentResponse>, AppError> {
    let mut tx = state.pool.begin().await?;
    let department = DepartmentDao::query_by_code(&mut tx, &code).await?;
    tx.commit().await?;
    Ok(Json(DepartmentResponse::from_entity(department)))
}

pub async fn put(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<AddOrUpdateDepartmentRequest>,
) -> Result<Json<DepartmentResponse>, AppError> {
    let mut tx = state.pool.begin().await?;
    let department = DepartmentDao::insert_or_update(&mut tx, body.into_entity(code)).await?;
    tx.commit().await?;
    Ok(Json(DepartmentResponse::from_entity(department)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut tx = state.pool.begin().await?;
    DepartmentDao::delete_by_code(&mut tx, &code).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /departments/{code}/employees: adds an employee to an existing
/// department. Responds 201 with a Location header naming the created
/// resource; a missing department is a 404 before anything persists.
pub async fn add_employee(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<AddEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = state.pool.begin().await?;
    let employee = EmployeeDao::insert(&mut tx, body.into_entity(code)).await?;
    tx.commit().await?;
    let location = format!("/api/v1/employees/{}", employee.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(EmployeeResponse::from_entity(employee)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_takes_no_code_field_and_aliases_notes() {
        let body = r#"{"name":"Seattle's Office","countryCode":"USA","city":"Seattle","notes":"HQ"}"#;
        let req: AddOrUpdateDepartmentRequest = serde_json::from_str(body).unwrap();
        let entity = req.into_entity("SEA".into());
        assert_eq!(entity.code, "SEA");
        assert_eq!(entity.country_code, "USA");
        assert_eq!(entity.comments.as_deref(), Some("HQ"));
    }

    #[test]
    fn response_omits_employees_unless_set() {
        let res = DepartmentResponse::from_entity(Department {
            code: "SEA".into(),
            name: "Seattle's Office".into(),
            country_code: "USA".into(),
            city: "Seattle".into(),
            comments: None,
            date_created: Utc::now(),
        });
        let json = serde_json::to_value(&res).unwrap();
        assert!(json.get("employees").is_none());
        assert_eq!(json["countryCode"], "USA");
        assert_eq!(json["notes"], serde_json::Value::Null);
    }
}
