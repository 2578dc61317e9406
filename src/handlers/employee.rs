//! Employee routes: list, read, full update. Creation goes through the
//! department routes since a new employee always joins a department.

use crate::dao::EmployeeDao;
use crate::error::AppError;
use crate::model::{Employee, NewEmployee};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of POST /departments/{code}/employees; the department code comes
/// from the path.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    #[serde(default, rename = "notes")]
    pub comments: Option<String>,
}

impl AddEmployeeRequest {
    pub fn into_entity(self, department_code: String) -> NewEmployee {
        NewEmployee {
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            department_code,
            comments: self.comments,
        }
    }
}

/// Body of PUT /employees/{id}: a full replacement including the
/// department assignment.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub department_code: String,
    #[serde(default, rename = "notes")]
    pub comments: Option<String>,
}

impl UpdateEmployeeRequest {
    pub fn into_entity(self) -> NewEmployee {
        NewEmployee {
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            department_code: self.department_code,
            comments: self.comments,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub department_code: String,
    #[serde(rename = "notes")]
    pub comments: Option<String>,
    pub date_created: DateTime<Utc>,
}

impl EmployeeResponse {
    pub fn from_entity(entity: Employee) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            age: entity.age,
            department_code: entity.department_code,
            comments: entity.comments,
            date_created: entity.date_created,
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<EmployeeResponse>>, AppError> {
    let mut tx = state.pool.begin().await?;
    let employees = EmployeeDao::query_all(&mut tx).await?;
    tx.commit().await?;
    Ok(Json(employees.into_iter().map(EmployeeResponse::from_entity).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let mut tx = state.pool.begin().await?;
    let employee = EmployeeDao::query_by_id(&mut tx, id).await?;
    tx.commit().await?;
    Ok(Json(EmployeeResponse::from_entity(employee)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let mut tx = state.pool.begin().await?;
    let employee = EmployeeDao::update(&mut tx, id, body.into_entity()).await?;
    tx.commit().await?;
    Ok(Json(EmployeeResponse::from_entity(employee)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_deserialize_camel_case_with_notes_alias() {
        let body = r#"{"firstName":"Jemmy","lastName":"Hyland","age":27,"notes":"CPO"}"#;
        let req: AddEmployeeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.first_name, "Jemmy");
        assert_eq!(req.comments.as_deref(), Some("CPO"));

        let body = r#"{"firstName":"Jemmy","lastName":"Hyland","age":28,"departmentCode":"CHI"}"#;
        let req: UpdateEmployeeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.department_code, "CHI");
        assert!(req.comments.is_none());
    }

    #[test]
    fn response_serializes_camel_case_with_notes_alias() {
        let res = EmployeeResponse {
            id: 7,
            first_name: "Toly".into(),
            last_name: "Pochkin".into(),
            age: 40,
            department_code: "SEA".into(),
            comments: Some("CEO".into()),
            date_created: Utc::now(),
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["departmentCode"], "SEA");
        assert_eq!(json["notes"], "CEO");
        assert!(json.get("comments").is_none());
        assert!(json.get("dateCreated").is_some());
    }
}
