//! Service layer for the teacher registry.
//! - `teacher` holds the record store and its request/filter types.
//! - `storage` holds the persistence backends the store is built on.
//! - Every operation returns `Result<_, ServiceError>`; status codes are the
//!   transport's business.

pub mod errors;
pub mod storage;
pub mod teacher;

pub use errors::ServiceError;
pub use teacher::{NewTeacher, Teacher, TeacherFilter, TeacherInput, TeacherStore};
