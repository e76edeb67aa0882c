use serde::{Deserialize, Serialize};

/// Printable document handed to a [`crate::document::DocumentSink`].
/// Coordinates are millimetres from the page's top-left corner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn pages_of(&self, section: Section) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(move |p| p.section == section)
    }

    /// Body rows of every table fragment of `section`, in print order.
    pub fn table_rows(&self, section: Section) -> Vec<&Vec<String>> {
        self.pages_of(section)
            .flat_map(|p| p.blocks.iter())
            .filter_map(|b| match &b.content {
                BlockContent::Table(t) => Some(t.body.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Attendance,
    Activities,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page {
    pub number: usize,
    pub section: Section,
    pub blocks: Vec<Block>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Block {
    pub y: f32,
    pub height: f32,
    pub content: BlockContent,
}

impl Block {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockContent {
    Heading { text: String },
    Text { text: String },
    Table(TableBlock),
    SignatureLines { labels: Vec<String> },
}

/// One page's fragment of a table. Continuation fragments repeat the head.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
    pub column_widths: Vec<f32>,
    pub continued: bool,
}
