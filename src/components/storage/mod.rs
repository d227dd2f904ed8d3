pub mod codec;

pub mod error;

pub mod student_file;
