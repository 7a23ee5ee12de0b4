use crate::config::LayoutConfig;
use crate::export::ExportList;

/// A line of text positioned on a page, coordinates in millimetres from the
/// top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Backend-independent layout of one exported list.
///
/// The first page carries the title and the separator rule; body lines
/// continue onto new pages once the cursor passes the page break offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ListDocument {
    pub title: String,
    pub file_name_stem: String,
    pub pages: Vec<Page>,
}

impl ListDocument {
    pub fn layout(list: &ExportList, layout: &LayoutConfig) -> Self {
        let mut pages = vec![Page::default()];
        let mut y = layout.first_line_y;

        for (index, entry) in list.entries.iter().enumerate() {
            if y > layout.page_break_y {
                pages.push(Page::default());
                y = layout.continuation_y;
            }

            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    text: entry.line(index + 1),
                    x: layout.body_x,
                    y,
                });
            }
            y += layout.line_height;
        }

        Self {
            title: list.kind.title(),
            file_name_stem: format!("{}_phone_numbers", list.kind.label().to_lowercase()),
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// Plain-text rendering: title, rule, numbered lines, form feed between pages.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"-".repeat(self.title.len().max(40)));
        out.push('\n');

        for (page_index, page) in self.pages.iter().enumerate() {
            if page_index > 0 {
                out.push('\u{000C}');
                out.push('\n');
            }
            for line in &page.lines {
                out.push_str(&line.text);
                out.push('\n');
            }
        }

        out
    }
}
