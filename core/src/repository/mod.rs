pub mod file;
pub mod traits;

pub use file::{default_data_dir, FileReportSource, PayloadFileSource};
pub use traits::ReportSource;
