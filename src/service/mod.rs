//! Business logic that spans more than one table.

mod report;

pub use report::EmployeeReportService;
