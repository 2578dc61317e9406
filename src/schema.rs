//! Table and column descriptors: pure metadata from which DDL and DML
//! fragments are rendered. Identifiers come from `'static` definitions in
//! `model`, never from request input, so they are safe to interpolate.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlType {
    VarChar(u16),
    Integer,
    Serial,
    Text,
    Timestamptz,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::VarChar(size) => write!(f, "VARCHAR({})", size),
            SqlType::Integer => f.write_str("INTEGER"),
            SqlType::Serial => f.write_str("SERIAL"),
            SqlType::Text => f.write_str("TEXT"),
            SqlType::Timestamptz => f.write_str("TIMESTAMPTZ"),
        }
    }
}

/// One typed column: name, SQL type, nullability and an optional trailing
/// DDL specifier such as "PRIMARY KEY", "UNIQUE", "DEFAULT NOW()" or a
/// REFERENCES clause.
#[derive(Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
    pub specifier: Option<&'static str>,
}

impl ColumnDef {
    /// DDL fragment for this column, e.g. `code VARCHAR(3) NOT NULL PRIMARY KEY`.
    pub fn definition(&self) -> String {
        let mut def = format!("{} {}", self.name, self.sql_type);
        if !self.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some(spec) = self.specifier {
            def.push(' ');
            def.push_str(spec);
        }
        def
    }

    /// Conventional name for an index over this column, e.g. `employees_age_idx`.
    pub fn index_name(&self, table: &TableDef) -> String {
        format!("{}_{}_idx", table.name, self.name)
    }
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [&'static ColumnDef],
}

impl TableDef {
    pub fn columns(&self) -> ColumnSet<'_> {
        ColumnSet {
            cols: self.columns.to_vec(),
        }
    }
}

/// An ordered subset of a table's columns. Templates derive their column
/// lists, placeholder lists and assignment lists from this.
pub struct ColumnSet<'a> {
    cols: Vec<&'a ColumnDef>,
}

impl<'a> ColumnSet<'a> {
    /// Removes the given columns from the set. Panics if a column is not a
    /// member: that is a template-authoring error, caught the moment the
    /// template is built rather than when a statement executes. Membership
    /// is by identity, so a same-named column from another table is rejected.
    pub fn without(mut self, excluded: &[&ColumnDef]) -> Self {
        for ex in excluded {
            let before = self.cols.len();
            self.cols.retain(|c| !std::ptr::eq(*c, *ex));
            assert!(
                self.cols.len() < before,
                "column '{}' is not part of this column set",
                ex.name
            );
        }
        self
    }

    pub fn len(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    /// Comma-separated column names: `code, name, country_code, ...`
    pub fn names(&self) -> String {
        self.cols
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Positional placeholders for a VALUES list: `$1, $2, ..., $n`.
    pub fn placeholders(&self) -> String {
        (1..=self.cols.len())
            .map(|n| format!("${}", n))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// SET-list assignments with placeholders numbered from `start`:
    /// `first_name = $1, last_name = $2, ...`
    pub fn assignments(&self, start: usize) -> String {
        self.cols
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", c.name, start + i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// PostgreSQL upsert assignments: `name = EXCLUDED.name, ...`
    pub fn excluded_assignments(&self) -> String {
        self.cols
            .iter()
            .map(|c| format!("{} = EXCLUDED.{}", c.name, c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Column DDL fragments joined for a CREATE TABLE body.
    pub fn definitions(&self) -> String {
        self.cols
            .iter()
            .map(|c| c.definition())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Aliased select list for multi-table queries:
    /// `t_dep.code AS d_code, t_dep.name AS d_name, ...`
    /// The prefix keeps same-named columns from two tables apart in the
    /// result row, so extraction stays unambiguous.
    pub fn qualified(&self, alias: &str, prefix: &str) -> String {
        self.cols
            .iter()
            .map(|c| format!("{}.{} AS {}{}", alias, c.name, prefix, c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{departments, employees};

    #[test]
    fn column_definition_renders_type_nullability_and_specifier() {
        assert_eq!(departments::CODE.definition(), "code VARCHAR(3) NOT NULL PRIMARY KEY");
        assert_eq!(departments::COMMENTS.definition(), "comments TEXT");
        assert_eq!(
            departments::DATE_CREATED.definition(),
            "date_created TIMESTAMPTZ NOT NULL DEFAULT NOW()"
        );
    }

    #[test]
    fn names_and_placeholders_follow_column_order() {
        let cols = departments::TABLE.columns().without(&[&departments::DATE_CREATED]);
        assert_eq!(cols.names(), "code, name, country_code, city, comments");
        assert_eq!(cols.placeholders(), "$1, $2, $3, $4, $5");
    }

    #[test]
    fn assignments_number_from_start() {
        let cols = employees::TABLE
            .columns()
            .without(&[&employees::ID, &employees::DATE_CREATED]);
        assert_eq!(
            cols.assignments(1),
            "first_name = $1, last_name = $2, age = $3, department_code = $4, comments = $5"
        );
    }

    #[test]
    fn excluded_assignments_render_upsert_set_list() {
        let cols = departments::TABLE
            .columns()
            .without(&[&departments::CODE, &departments::DATE_CREATED]);
        assert_eq!(
            cols.excluded_assignments(),
            "name = EXCLUDED.name, country_code = EXCLUDED.country_code, \
             city = EXCLUDED.city, comments = EXCLUDED.comments"
        );
    }

    #[test]
    fn qualified_prefixes_every_column() {
        let cols = departments::TABLE
            .columns()
            .without(&[&departments::NAME, &departments::CITY, &departments::COMMENTS]);
        assert_eq!(
            cols.qualified("t_dep", "d_"),
            "t_dep.code AS d_code, t_dep.country_code AS d_country_code, \
             t_dep.date_created AS d_date_created"
        );
    }

    #[test]
    #[should_panic(expected = "not part of this column set")]
    fn excluding_a_foreign_column_panics_at_build_time() {
        // employees.comments has the same name as departments.comments but is
        // a different column; identity-based exclusion must reject it.
        let _ = departments::TABLE.columns().without(&[&employees::COMMENTS]);
    }
}
