//! Data access objects. Each operation runs one statement and takes an
//! explicit transaction connection; the route layer owns commit/rollback.

mod department;
mod employee;

pub use department::DepartmentDao;
pub use employee::EmployeeDao;
