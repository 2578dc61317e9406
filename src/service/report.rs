//! Employee reports grouped by department.

use crate::error::AppError;
use crate::model::{departments, employees, Department, Employee};
use sqlx::{PgConnection, Row};
use std::sync::LazyLock;

const DEPARTMENT_PREFIX: &str = "d_";
const EMPLOYEE_PREFIX: &str = "e_";

// Left-outer join so departments with no qualifying employee still appear.
// The age bounds live in the ON clause: putting them in WHERE would turn
// the join into an inner one and drop empty departments from the report.
static SELECT_WITHIN_AGE_RANGE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {}, {} \
         FROM {} AS t_dep \
         LEFT OUTER JOIN {} AS t_emp \
         ON t_dep.{} = t_emp.{} AND t_emp.{} >= $2 AND t_emp.{} <= $3 \
         WHERE t_dep.{} = $1 \
         ORDER BY t_dep.{}, t_emp.{}, t_emp.{}",
        departments::TABLE.columns().qualified("t_dep", DEPARTMENT_PREFIX),
        employees::TABLE.columns().qualified("t_emp", EMPLOYEE_PREFIX),
        departments::TABLE.name,
        employees::TABLE.name,
        departments::CODE.name,
        employees::DEPARTMENT_CODE.name,
        employees::AGE.name,
        employees::AGE.name,
        departments::COUNTRY_CODE.name,
        departments::CODE.name,
        employees::LAST_NAME.name,
        employees::FIRST_NAME.name,
    )
});

pub struct EmployeeReportService;

impl EmployeeReportService {
    /// Every department in `country_code` paired with its employees inside
    /// the inclusive `[lower_age, upper_age]` range. Departments are ordered
    /// by code, employees by last then first name; a department with no
    /// matching employee carries an empty list. One query, all or nothing.
    pub async fn employees_by_department(
        conn: &mut PgConnection,
        country_code: &str,
        lower_age: i32,
        upper_age: i32,
    ) -> Result<Vec<(Department, Vec<Employee>)>, AppError> {
        tracing::debug!(sql = %*SELECT_WITHIN_AGE_RANGE, country_code, lower_age, upper_age, "employees_by_department");
        let rows = sqlx::query(&SELECT_WITHIN_AGE_RANGE)
            .bind(country_code)
            .bind(lower_age)
            .bind(upper_age)
            .fetch_all(conn)
            .await?;

        let employee_id_col = format!("{}{}", EMPLOYEE_PREFIX, employees::ID.name);
        let mut report: Vec<(Department, Vec<Employee>)> = Vec::new();
        for row in &rows {
            let department = Department::from_row_prefixed(row, DEPARTMENT_PREFIX)?;
            // The employee side of the join is all-NULL for departments
            // without a match in the age range.
            let employee = match row.try_get::<Option<i32>, _>(employee_id_col.as_str())? {
                Some(_) => Some(Employee::from_row_prefixed(row, EMPLOYEE_PREFIX)?),
                None => None,
            };
            match report.last_mut() {
                Some((last, list)) if last.code == department.code => {
                    if let Some(e) = employee {
                        list.push(e);
                    }
                }
                _ => report.push((department, employee.into_iter().collect())),
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_joins_left_outer_with_age_bounds_in_on_clause() {
        let sql = &*SELECT_WITHIN_AGE_RANGE;
        assert!(sql.contains("LEFT OUTER JOIN employees AS t_emp"));
        assert!(sql.contains("ON t_dep.code = t_emp.department_code AND t_emp.age >= $2 AND t_emp.age <= $3"));
        assert!(sql.contains("WHERE t_dep.country_code = $1"));
        assert!(sql.ends_with("ORDER BY t_dep.code, t_emp.last_name, t_emp.first_name"));
    }

    #[test]
    fn report_select_list_is_fully_aliased() {
        let sql = &*SELECT_WITHIN_AGE_RANGE;
        assert!(sql.contains("t_dep.code AS d_code"));
        assert!(sql.contains("t_emp.id AS e_id"));
        // Both tables have a comments column; aliases keep them apart.
        assert!(sql.contains("t_dep.comments AS d_comments"));
        assert!(sql.contains("t_emp.comments AS e_comments"));
    }
}
