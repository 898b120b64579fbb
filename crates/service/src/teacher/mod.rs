//! Teacher records: the domain types and the store that owns them.

pub mod domain;
pub mod store;

pub use domain::{NewTeacher, Teacher, TeacherFilter, TeacherInput};
pub use store::TeacherStore;
