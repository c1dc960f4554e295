pub mod course_record;
pub mod faculty;
pub mod page;
