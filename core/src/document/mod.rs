pub mod compiler;
pub mod descriptor;
pub mod layout;
pub mod sink;

pub use compiler::{attendance_rows, compile_class_diary, DiaryOptions};
pub use descriptor::{Block, BlockContent, Document, Page, Section, TableBlock};
pub use sink::{artifact_file_name, write_artifact, DocumentSink, JsonSink};
