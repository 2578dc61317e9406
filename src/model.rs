//! Entity records and their table descriptors.
//!
//! The column statics double as typed accessor keys: DAOs build templates
//! from them and extractors read result rows through them, so a renamed
//! column only ever changes in one place.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;

pub mod departments {
    use crate::schema::{ColumnDef, SqlType, TableDef};

    pub static CODE: ColumnDef = ColumnDef {
        name: "code",
        sql_type: SqlType::VarChar(3),
        nullable: false,
        specifier: Some("PRIMARY KEY"),
    };
    pub static NAME: ColumnDef = ColumnDef {
        name: "name",
        sql_type: SqlType::VarChar(100),
        nullable: false,
        specifier: Some("UNIQUE"),
    };
    pub static COUNTRY_CODE: ColumnDef = ColumnDef {
        name: "country_code",
        sql_type: SqlType::VarChar(3),
        nullable: false,
        specifier: None,
    };
    pub static CITY: ColumnDef = ColumnDef {
        name: "city",
        sql_type: SqlType::VarChar(20),
        nullable: false,
        specifier: None,
    };
    pub static COMMENTS: ColumnDef = ColumnDef {
        name: "comments",
        sql_type: SqlType::Text,
        nullable: true,
        specifier: None,
    };
    // Assigned by the database on first insert and never updated afterwards.
    pub static DATE_CREATED: ColumnDef = ColumnDef {
        name: "date_created",
        sql_type: SqlType::Timestamptz,
        nullable: false,
        specifier: Some("DEFAULT NOW()"),
    };

    pub static TABLE: TableDef = TableDef {
        name: "departments",
        columns: &[&CODE, &NAME, &COUNTRY_CODE, &CITY, &COMMENTS, &DATE_CREATED],
    };
}

pub mod employees {
    use crate::schema::{ColumnDef, SqlType, TableDef};

    pub static ID: ColumnDef = ColumnDef {
        name: "id",
        sql_type: SqlType::Serial,
        nullable: false,
        specifier: Some("PRIMARY KEY"),
    };
    pub static FIRST_NAME: ColumnDef = ColumnDef {
        name: "first_name",
        sql_type: SqlType::VarChar(50),
        nullable: false,
        specifier: None,
    };
    pub static LAST_NAME: ColumnDef = ColumnDef {
        name: "last_name",
        sql_type: SqlType::VarChar(50),
        nullable: false,
        specifier: None,
    };
    pub static AGE: ColumnDef = ColumnDef {
        name: "age",
        sql_type: SqlType::Integer,
        nullable: false,
        specifier: None,
    };
    pub static DEPARTMENT_CODE: ColumnDef = ColumnDef {
        name: "department_code",
        sql_type: SqlType::VarChar(3),
        nullable: false,
        specifier: Some("REFERENCES departments (code)"),
    };
    pub static COMMENTS: ColumnDef = ColumnDef {
        name: "comments",
        sql_type: SqlType::Text,
        nullable: true,
        specifier: None,
    };
    pub static DATE_CREATED: ColumnDef = ColumnDef {
        name: "date_created",
        sql_type: SqlType::Timestamptz,
        nullable: false,
        specifier: Some("DEFAULT NOW()"),
    };

    pub static TABLE: TableDef = TableDef {
        name: "employees",
        columns: &[
            &ID,
            &FIRST_NAME,
            &LAST_NAME,
            &AGE,
            &DEPARTMENT_CODE,
            &COMMENTS,
            &DATE_CREATED,
        ],
    };
}

/// A persisted department row.
#[derive(Clone, Debug, PartialEq)]
pub struct Department {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub city: String,
    pub comments: Option<String>,
    pub date_created: DateTime<Utc>,
}

/// Department fields as supplied by a caller; `date_created` is owned by
/// the store and filled in on the way back out.
#[derive(Clone, Debug)]
pub struct NewDepartment {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub city: String,
    pub comments: Option<String>,
}

impl Department {
    pub fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            code: row.try_get(departments::CODE.name)?,
            name: row.try_get(departments::NAME.name)?,
            country_code: row.try_get(departments::COUNTRY_CODE.name)?,
            city: row.try_get(departments::CITY.name)?,
            comments: row.try_get(departments::COMMENTS.name)?,
            date_created: row.try_get(departments::DATE_CREATED.name)?,
        })
    }

    /// Reads the aliased columns emitted by `ColumnSet::qualified`.
    pub fn from_row_prefixed(row: &PgRow, prefix: &str) -> Result<Self, sqlx::Error> {
        let col = |name: &str| format!("{}{}", prefix, name);
        Ok(Self {
            code: row.try_get(col(departments::CODE.name).as_str())?,
            name: row.try_get(col(departments::NAME.name).as_str())?,
            country_code: row.try_get(col(departments::COUNTRY_CODE.name).as_str())?,
            city: row.try_get(col(departments::CITY.name).as_str())?,
            comments: row.try_get(col(departments::COMMENTS.name).as_str())?,
            date_created: row.try_get(col(departments::DATE_CREATED.name).as_str())?,
        })
    }
}

/// A persisted employee row; `id` and `date_created` are store-assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub department_code: String,
    pub comments: Option<String>,
    pub date_created: DateTime<Utc>,
}

/// Employee fields as supplied by a caller on insert or update.
#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub department_code: String,
    pub comments: Option<String>,
}

impl Employee {
    pub fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(employees::ID.name)?,
            first_name: row.try_get(employees::FIRST_NAME.name)?,
            last_name: row.try_get(employees::LAST_NAME.name)?,
            age: row.try_get(employees::AGE.name)?,
            department_code: row.try_get(employees::DEPARTMENT_CODE.name)?,
            comments: row.try_get(employees::COMMENTS.name)?,
            date_created: row.try_get(employees::DATE_CREATED.name)?,
        })
    }

    /// Reads the aliased columns emitted by `ColumnSet::qualified`.
    pub fn from_row_prefixed(row: &PgRow, prefix: &str) -> Result<Self, sqlx::Error> {
        let col = |name: &str| format!("{}{}", prefix, name);
        Ok(Self {
            id: row.try_get(col(employees::ID.name).as_str())?,
            first_name: row.try_get(col(employees::FIRST_NAME.name).as_str())?,
            last_name: row.try_get(col(employees::LAST_NAME.name).as_str())?,
            age: row.try_get(col(employees::AGE.name).as_str())?,
            department_code: row.try_get(col(employees::DEPARTMENT_CODE.name).as_str())?,
            comments: row.try_get(col(employees::COMMENTS.name).as_str())?,
            date_created: row.try_get(col(employees::DATE_CREATED.name).as_str())?,
        })
    }
}
