//! Data models for the inventory server

pub mod admin;
pub mod laptop;
pub mod pagination;
pub mod student_laptop;

// Re-export commonly used types
pub use admin::AdminClaims;
pub use laptop::{Laptop, LaptopFilter, NewLaptop};
pub use pagination::{Page, PageRequest, Pagination};
pub use student_laptop::{NewStudentLaptop, StudentFilter, StudentLaptop};
