use crate::document::descriptor::{Block, BlockContent, Page, Section, TableBlock};

pub const PAGE_WIDTH: f32 = 297.0;
pub const PAGE_HEIGHT: f32 = 210.0;
pub const MARGIN: f32 = 14.0;
pub const CONTENT_TOP: f32 = MARGIN;
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

pub const HEADING_HEIGHT: f32 = 8.0;
pub const TEXT_HEIGHT: f32 = 6.0;
pub const HEAD_ROW_HEIGHT: f32 = 7.0;
pub const BODY_ROW_HEIGHT: f32 = 6.0;
pub const BLOCK_GAP: f32 = 4.0;
pub const SIGNATURE_GAP: f32 = 16.0;
pub const SIGNATURE_HEIGHT: f32 = 10.0;

// Average glyph advance of the body font.
const CHAR_WIDTH: f32 = 1.9;

fn chars_per_line(width: f32) -> usize {
    ((width - 2.0) / CHAR_WIDTH).floor().max(1.0) as usize
}

/// Number of body lines `text` needs in a column `width` millimetres wide.
pub fn wrapped_lines(text: &str, width: f32) -> usize {
    text.chars().count().div_ceil(chars_per_line(width)).max(1)
}

/// Most body lines one row may span so that it fits under a table head,
/// with `reserved` millimetres already used at the top of the page.
pub fn max_row_lines(reserved: f32) -> usize {
    ((CONTENT_BOTTOM - CONTENT_TOP - HEAD_ROW_HEIGHT - reserved) / BODY_ROW_HEIGHT)
        .floor()
        .max(1.0) as usize
}

/// Sizes `row` by the wrapped text of cell `column`. A cell longer than
/// `max_lines` is cut into continuation rows whose other cells are empty.
pub fn split_row(row: Vec<String>, column: usize, width: f32, max_lines: usize) -> Vec<(Vec<String>, f32)> {
    let lines = row.get(column).map(|text| wrapped_lines(text, width)).unwrap_or(1);
    if lines <= max_lines {
        return vec![(row, BODY_ROW_HEIGHT * lines as f32)];
    }

    let chars: Vec<char> = row[column].chars().collect();
    let piece_len = chars_per_line(width) * max_lines.max(1);
    chars
        .chunks(piece_len)
        .enumerate()
        .map(|(i, piece)| {
            let text: String = piece.iter().collect();
            let height = BODY_ROW_HEIGHT * wrapped_lines(&text, width) as f32;
            let mut cells = if i == 0 {
                row.clone()
            } else {
                vec![String::new(); row.len()]
            };
            cells[column] = text;
            (cells, height)
        })
        .collect()
}

/// Flows blocks top to bottom, opening pages as needed.
pub struct PageCursor {
    pages: Vec<Page>,
    y: f32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            y: CONTENT_TOP,
        }
    }

    pub fn new_page(&mut self, section: Section) {
        self.pages.push(Page {
            number: self.pages.len() + 1,
            section,
            blocks: Vec::new(),
        });
        self.y = CONTENT_TOP;
    }

    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= CONTENT_BOTTOM
    }

    pub fn gap(&mut self, height: f32) {
        self.y += height;
    }

    fn section(&self) -> Section {
        self.pages.last().map(|p| p.section).unwrap_or(Section::Attendance)
    }

    /// Places `content` at the cursor; breaks the page first when it would not fit.
    pub fn place(&mut self, content: BlockContent, height: f32) {
        if self.pages.is_empty() || (!self.fits(height) && self.y > CONTENT_TOP) {
            let section = self.section();
            self.new_page(section);
        }
        let block = Block {
            y: self.y,
            height,
            content,
        };
        self.y = block.bottom();
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(block);
        }
    }

    /// Places a table, splitting its body across pages. Each fragment
    /// repeats the head. Returns the y where the last fragment ends.
    pub fn place_table(
        &mut self,
        head: Vec<String>,
        body: Vec<(Vec<String>, f32)>,
        column_widths: Vec<f32>,
    ) -> f32 {
        let mut rows = body.into_iter().peekable();
        let mut continued = false;

        loop {
            let first_row = rows.peek().map(|(_, h)| *h).unwrap_or(0.0);
            if self.pages.is_empty() || (!self.fits(HEAD_ROW_HEIGHT + first_row) && self.y > CONTENT_TOP) {
                let section = self.section();
                self.new_page(section);
            }

            let available = CONTENT_BOTTOM - self.y;
            let mut height = HEAD_ROW_HEIGHT;
            let mut chunk = Vec::new();
            loop {
                let fits = match rows.peek() {
                    Some((_, row_height)) => chunk.is_empty() || height + row_height <= available,
                    None => false,
                };
                if !fits {
                    break;
                }
                if let Some((row, row_height)) = rows.next() {
                    chunk.push(row);
                    height += row_height;
                }
            }

            self.place(
                BlockContent::Table(TableBlock {
                    head: head.clone(),
                    body: chunk,
                    column_widths: column_widths.clone(),
                    continued,
                }),
                height,
            );

            if rows.peek().is_none() {
                return self.y;
            }
            let section = self.section();
            self.new_page(section);
            continued = true;
        }
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}
