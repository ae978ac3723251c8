pub mod capture_file;
pub mod photo;
