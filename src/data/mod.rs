pub mod course;
pub mod user;
