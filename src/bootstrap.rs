//! Drop-and-recreate database bootstrap with a fixed demo dataset:
//! 4 departments and 5 employees. Running it twice leaves exactly the same
//! row counts; it is never additive.

use crate::dao::{DepartmentDao, EmployeeDao};
use crate::error::AppError;
use crate::model::{departments, employees, NewDepartment, NewEmployee};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgConnection;
use std::sync::LazyLock;

// Seed inserts set date_created explicitly (unlike the regular DAO insert
// paths) so the creation-time ordering of the demo data is deterministic.
static SEED_DEPARTMENT: LazyLock<String> = LazyLock::new(|| {
    let cols = departments::TABLE.columns();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        departments::TABLE.name,
        cols.names(),
        cols.placeholders(),
    )
});

static SEED_EMPLOYEE: LazyLock<String> = LazyLock::new(|| {
    let cols = employees::TABLE.columns().without(&[&employees::ID]);
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        employees::TABLE.name,
        cols.names(),
        cols.placeholders(),
    )
});

fn department(
    code: &str,
    name: &str,
    country_code: &str,
    city: &str,
    comments: &str,
) -> NewDepartment {
    NewDepartment {
        code: code.into(),
        name: name.into(),
        country_code: country_code.into(),
        city: city.into(),
        comments: Some(comments.into()),
    }
}

fn employee(first_name: &str, last_name: &str, age: i32, department_code: &str, comments: &str) -> NewEmployee {
    NewEmployee {
        first_name: first_name.into(),
        last_name: last_name.into(),
        age,
        department_code: department_code.into(),
        comments: Some(comments.into()),
    }
}

/// Demo departments with staggered historical creation timestamps.
pub fn seed_departments(now: DateTime<Utc>) -> Vec<(NewDepartment, DateTime<Utc>)> {
    vec![
        (
            department("SEA", "Seattle's Office", "USA", "Seattle", "Headquarter and R&D"),
            now - Duration::milliseconds(99_999_999_999),
        ),
        (
            department("CHI", "Chicago's Office", "USA", "Chicago", "Financial department"),
            now - Duration::milliseconds(77_777_777_777),
        ),
        (
            department("BER", "Berlin's Office", "DEU", "Berlin", "R&D"),
            now - Duration::milliseconds(55_555_555_555),
        ),
        (
            department("AMS", "Amsterdam's Office", "NLD", "Amsterdam", "Just for fun :)"),
            now - Duration::milliseconds(33_333_333_333),
        ),
    ]
}

/// Demo employees; creation timestamps increase in list order so
/// `ORDER BY date_created` reproduces it.
pub fn seed_employees(now: DateTime<Utc>) -> Vec<(NewEmployee, DateTime<Utc>)> {
    vec![
        (
            employee("Toly", "Pochkin", 40, "SEA", "CEO"),
            now - Duration::milliseconds(89_999_999_999),
        ),
        (
            employee("Jemmy", "Hyland", 27, "SEA", "CPO"),
            now - Duration::milliseconds(79_999_999_999),
        ),
        (
            employee("Doreen", "Fosse", 35, "CHI", "CFO"),
            now - Duration::milliseconds(69_999_999_999),
        ),
        (
            employee("Brandy", "Ashworth", 39, "BER", "Lead engineer"),
            now - Duration::milliseconds(45_555_555_555),
        ),
        (
            employee("Lenny", "Matthews", 50, "AMS", "DJ"),
            now - Duration::milliseconds(25_555_555_555),
        ),
    ]
}

/// Drops both tables (employees first, it holds the foreign key), recreates
/// them and loads the demo dataset, all on the caller's transaction.
pub async fn reset_and_seed(conn: &mut PgConnection) -> Result<(), AppError> {
    EmployeeDao::drop_table_if_exists(&mut *conn).await?;
    DepartmentDao::drop_table_if_exists(&mut *conn).await?;
    DepartmentDao::create_table_if_not_exists(&mut *conn).await?;
    EmployeeDao::create_table_if_not_exists(&mut *conn).await?;

    let now = Utc::now();
    for (d, date_created) in seed_departments(now) {
        tracing::debug!(sql = %*SEED_DEPARTMENT, code = %d.code, "seed department");
        sqlx::query(&SEED_DEPARTMENT)
            .bind(&d.code)
            .bind(&d.name)
            .bind(&d.country_code)
            .bind(&d.city)
            .bind(&d.comments)
            .bind(date_created)
            .execute(&mut *conn)
            .await?;
    }
    for (e, date_created) in seed_employees(now) {
        tracing::debug!(sql = %*SEED_EMPLOYEE, last_name = %e.last_name, "seed employee");
        sqlx::query(&SEED_EMPLOYEE)
            .bind(&e.first_name)
            .bind(&e.last_name)
            .bind(e.age)
            .bind(&e.department_code)
            .bind(&e.comments)
            .bind(date_created)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
