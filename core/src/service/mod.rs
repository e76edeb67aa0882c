pub mod collation;
pub mod matrix;
pub mod report;
pub mod timeline;
