//! Data access for Employee rows.
//!
//! One statement per call on the caller's transaction connection. Raw
//! foreign-key violations are classified here so callers only ever see the
//! domain-level error.

use crate::error::{is_foreign_key_violation, AppError};
use crate::model::{employees, Employee, NewEmployee};
use sqlx::{PgConnection, Row};
use std::sync::LazyLock;

static CREATE_TABLE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        employees::TABLE.name,
        employees::TABLE.columns().definitions(),
    )
});

static CREATE_AGE_INDEX: LazyLock<String> = LazyLock::new(|| {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        employees::AGE.index_name(&employees::TABLE),
        employees::TABLE.name,
        employees::AGE.name,
    )
});

static DROP_TABLE: LazyLock<String> =
    LazyLock::new(|| format!("DROP TABLE IF EXISTS {}", employees::TABLE.name));

// id is store-generated and date_created defaults to NOW(); both come back
// through RETURNING so no second round trip is needed.
static INSERT: LazyLock<String> = LazyLock::new(|| {
    let cols = employees::TABLE
        .columns()
        .without(&[&employees::ID, &employees::DATE_CREATED]);
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}, {}",
        employees::TABLE.name,
        cols.names(),
        cols.placeholders(),
        employees::ID.name,
        employees::DATE_CREATED.name,
    )
});

// date_created is excluded from the SET list: it was assigned at creation
// and must never change on update.
static UPDATE: LazyLock<String> = LazyLock::new(|| {
    let cols = employees::TABLE
        .columns()
        .without(&[&employees::ID, &employees::DATE_CREATED]);
    let id_param = cols.len() + 1;
    format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        employees::TABLE.name,
        cols.assignments(1),
        employees::ID.name,
        id_param,
        employees::DATE_CREATED.name,
    )
});

static SELECT_BY_ID: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        employees::TABLE.columns().names(),
        employees::TABLE.name,
        employees::ID.name,
    )
});

// Ordered by creation time; id breaks ties between rows created in the
// same transaction.
static SELECT_ALL_ORDERED_BY_CREATION: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {} FROM {} ORDER BY {}, {}",
        employees::TABLE.columns().names(),
        employees::TABLE.name,
        employees::DATE_CREATED.name,
        employees::ID.name,
    )
});

static COUNT_ALL: LazyLock<String> =
    LazyLock::new(|| format!("SELECT COUNT(*) FROM {}", employees::TABLE.name));

pub struct EmployeeDao;

impl EmployeeDao {
    pub async fn create_table_if_not_exists(conn: &mut PgConnection) -> Result<(), AppError> {
        tracing::debug!(sql = %*CREATE_TABLE, "create_table_if_not_exists");
        sqlx::query(&CREATE_TABLE).execute(&mut *conn).await?;
        tracing::debug!(sql = %*CREATE_AGE_INDEX, "create_table_if_not_exists");
        sqlx::query(&CREATE_AGE_INDEX).execute(conn).await?;
        Ok(())
    }

    pub async fn drop_table_if_exists(conn: &mut PgConnection) -> Result<(), AppError> {
        tracing::debug!(sql = %*DROP_TABLE, "drop_table_if_exists");
        sqlx::query(&DROP_TABLE).execute(conn).await?;
        Ok(())
    }

    /// Inserts a new employee; the store assigns id and date_created.
    /// A missing department code fails with `ReferentialViolation` and
    /// persists nothing.
    pub async fn insert(conn: &mut PgConnection, employee: NewEmployee) -> Result<Employee, AppError> {
        tracing::debug!(sql = %*INSERT, department_code = %employee.department_code, "insert");
        let row = sqlx::query(&INSERT)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(employee.age)
            .bind(&employee.department_code)
            .bind(&employee.comments)
            .fetch_one(conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    AppError::ReferentialViolation(format!(
                        "Department with code={} does not exist",
                        employee.department_code
                    ))
                } else {
                    AppError::Db(err)
                }
            })?;
        Ok(Employee {
            id: row.try_get(employees::ID.name)?,
            first_name: employee.first_name,
            last_name: employee.last_name,
            age: employee.age,
            department_code: employee.department_code,
            comments: employee.comments,
            date_created: row.try_get(employees::DATE_CREATED.name)?,
        })
    }

    /// Full update by id. Affecting zero rows is a not-found condition, not
    /// a silent no-op; date_created is preserved and returned as stored.
    pub async fn update(
        conn: &mut PgConnection,
        id: i32,
        employee: NewEmployee,
    ) -> Result<Employee, AppError> {
        tracing::debug!(sql = %*UPDATE, id, "update");
        let row = sqlx::query(&UPDATE)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(employee.age)
            .bind(&employee.department_code)
            .bind(&employee.comments)
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    AppError::ReferentialViolation(format!(
                        "Department with code={} does not exist",
                        employee.department_code
                    ))
                } else {
                    AppError::Db(err)
                }
            })?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Entity Employee id={} was not found and cannot be updated",
                    id
                ))
            })?;
        Ok(Employee {
            id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            age: employee.age,
            department_code: employee.department_code,
            comments: employee.comments,
            date_created: row.try_get(employees::DATE_CREATED.name)?,
        })
    }

    pub async fn query_by_id(conn: &mut PgConnection, id: i32) -> Result<Employee, AppError> {
        tracing::debug!(sql = %*SELECT_BY_ID, id, "query_by_id");
        let row = sqlx::query(&SELECT_BY_ID)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Entity Employee cannot be found by id={}", id)))?;
        Ok(Employee::from_row(&row)?)
    }

    /// All employees ordered by creation time.
    pub async fn query_all(conn: &mut PgConnection) -> Result<Vec<Employee>, AppError> {
        tracing::debug!(sql = %*SELECT_ALL_ORDERED_BY_CREATION, "query_all");
        let rows = sqlx::query(&SELECT_ALL_ORDERED_BY_CREATION)
            .fetch_all(conn)
            .await?;
        let employees = rows
            .iter()
            .map(Employee::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    pub async fn count_all(conn: &mut PgConnection) -> Result<i64, AppError> {
        tracing::debug!(sql = %*COUNT_ALL, "count_all");
        let count = sqlx::query_scalar(&COUNT_ALL).fetch_one(conn).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_excludes_generated_columns_and_returns_them() {
        assert_eq!(
            *INSERT,
            "INSERT INTO employees (first_name, last_name, age, department_code, comments) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id, date_created"
        );
    }

    #[test]
    fn update_never_touches_date_created() {
        assert_eq!(
            *UPDATE,
            "UPDATE employees \
             SET first_name = $1, last_name = $2, age = $3, department_code = $4, comments = $5 \
             WHERE id = $6 RETURNING date_created"
        );
    }

    #[test]
    fn age_index_is_named_after_table_and_column() {
        assert_eq!(
            *CREATE_AGE_INDEX,
            "CREATE INDEX IF NOT EXISTS employees_age_idx ON employees (age)"
        );
    }

    #[test]
    fn query_all_orders_by_creation_time() {
        assert!(SELECT_ALL_ORDERED_BY_CREATION.ends_with("ORDER BY date_created, id"));
    }
}
