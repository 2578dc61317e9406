//! Data access for Department rows.
//!
//! Every operation runs exactly one statement on the caller's transaction
//! connection. Keep business logic out of here; anything spanning more than
//! one table belongs in the service layer.

use crate::error::AppError;
use crate::model::{departments, Department, NewDepartment};
use sqlx::{PgConnection, Row};
use std::sync::LazyLock;

// Templates are rendered once from the schema descriptors and reused for
// every statement. An invalid column exclusion panics here, the first time
// a template is forced, never during statement execution.

static CREATE_TABLE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({}, UNIQUE ({}, {}))",
        departments::TABLE.name,
        departments::TABLE.columns().definitions(),
        departments::COUNTRY_CODE.name,
        departments::CITY.name,
    )
});

static DROP_TABLE: LazyLock<String> =
    LazyLock::new(|| format!("DROP TABLE IF EXISTS {}", departments::TABLE.name));

// Insert-or-update keyed on the natural primary key. The update path
// excludes code (the conflict key) and date_created (immutable after first
// insert); RETURNING hands back the persisted creation timestamp, which is
// the authoritative one whether the row was inserted or updated.
static UPSERT: LazyLock<String> = LazyLock::new(|| {
    let insert_cols = departments::TABLE.columns().without(&[&departments::DATE_CREATED]);
    let update_cols = departments::TABLE
        .columns()
        .without(&[&departments::CODE, &departments::DATE_CREATED]);
    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {} RETURNING {}",
        departments::TABLE.name,
        insert_cols.names(),
        insert_cols.placeholders(),
        departments::CODE.name,
        update_cols.excluded_assignments(),
        departments::DATE_CREATED.name,
    )
});

static SELECT_BY_CODE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        departments::TABLE.columns().names(),
        departments::TABLE.name,
        departments::CODE.name,
    )
});

static SELECT_ALL_ORDERED_BY_CODE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        departments::TABLE.columns().names(),
        departments::TABLE.name,
        departments::CODE.name,
    )
});

static DELETE_BY_CODE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "DELETE FROM {} WHERE {} = $1",
        departments::TABLE.name,
        departments::CODE.name,
    )
});

static COUNT_ALL: LazyLock<String> =
    LazyLock::new(|| format!("SELECT COUNT(*) FROM {}", departments::TABLE.name));

pub struct DepartmentDao;

impl DepartmentDao {
    pub async fn create_table_if_not_exists(conn: &mut PgConnection) -> Result<(), AppError> {
        tracing::debug!(sql = %*CREATE_TABLE, "create_table_if_not_exists");
        sqlx::query(&CREATE_TABLE).execute(conn).await?;
        Ok(())
    }

    pub async fn drop_table_if_exists(conn: &mut PgConnection) -> Result<(), AppError> {
        tracing::debug!(sql = %*DROP_TABLE, "drop_table_if_exists");
        sqlx::query(&DROP_TABLE).execute(conn).await?;
        Ok(())
    }

    /// Inserts the department, or updates every mutable column when a row
    /// with this code already exists. Returns the row with its persisted
    /// creation timestamp.
    pub async fn insert_or_update(
        conn: &mut PgConnection,
        department: NewDepartment,
    ) -> Result<Department, AppError> {
        tracing::debug!(sql = %*UPSERT, code = %department.code, "insert_or_update");
        let row = sqlx::query(&UPSERT)
            .bind(&department.code)
            .bind(&department.name)
            .bind(&department.country_code)
            .bind(&department.city)
            .bind(&department.comments)
            .fetch_one(conn)
            .await?;
        let date_created = row.try_get(departments::DATE_CREATED.name)?;
        Ok(Department {
            code: department.code,
            name: department.name,
            country_code: department.country_code,
            city: department.city,
            comments: department.comments,
            date_created,
        })
    }

    pub async fn query_by_code(conn: &mut PgConnection, code: &str) -> Result<Department, AppError> {
        tracing::debug!(sql = %*SELECT_BY_CODE, code, "query_by_code");
        let row = sqlx::query(&SELECT_BY_CODE)
            .bind(code)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department code={} cannot be found", code)))?;
        Ok(Department::from_row(&row)?)
    }

    /// All departments ordered by code.
    pub async fn query_all(conn: &mut PgConnection) -> Result<Vec<Department>, AppError> {
        tracing::debug!(sql = %*SELECT_ALL_ORDERED_BY_CODE, "query_all");
        let rows = sqlx::query(&SELECT_ALL_ORDERED_BY_CODE).fetch_all(conn).await?;
        let departments = rows
            .iter()
            .map(Department::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    pub async fn delete_by_code(conn: &mut PgConnection, code: &str) -> Result<(), AppError> {
        tracing::debug!(sql = %*DELETE_BY_CODE, code, "delete_by_code");
        let result = sqlx::query(&DELETE_BY_CODE).bind(code).execute(conn).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Department code={} cannot be found",
                code
            )));
        }
        Ok(())
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
    fn create_table_declares_every_column_and_the_city_constraint() {
        assert_eq!(
            *CREATE_TABLE,
            "CREATE TABLE IF NOT EXISTS departments (\
             code VARCHAR(3) NOT NULL PRIMARY KEY, \
             name VARCHAR(100) NOT NULL UNIQUE, \
             country_code VARCHAR(3) NOT NULL, \
             city VARCHAR(20) NOT NULL, \
             comments TEXT, \
             date_created TIMESTAMPTZ NOT NULL DEFAULT NOW(), \
             UNIQUE (country_code, city))"
        );
    }

    #[test]
    fn upsert_excludes_immutable_columns_and_returns_date_created() {
        assert_eq!(
            *UPSERT,
            "INSERT INTO departments (code, name, country_code, city, comments) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (code) \
             DO UPDATE SET name = EXCLUDED.name, country_code = EXCLUDED.country_code, \
             city = EXCLUDED.city, comments = EXCLUDED.comments \
             RETURNING date_created"
        );
    }

    #[test]
    fn query_all_orders_by_code() {
        assert!(SELECT_ALL_ORDERED_BY_CODE.ends_with("ORDER BY code"));
    }
}
