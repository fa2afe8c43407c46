//! Page layout for the PDF export.
//!
//! Positions are in millimetres with the origin at the bottom-left corner,
//! matching PDF user space. `y_mm` is the text baseline.

pub const PT_TO_MM: f32 = 25.4 / 72.0;

pub trait TextMeasure {
    /// Horizontal advance of one character.
    fn advance_mm(&self, ch: char, size_pt: f32) -> f32;

    fn width_mm(&self, text: &str, size_pt: f32) -> f32 {
        text.chars().map(|ch| self.advance_mm(ch, size_pt)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub title_size_pt: f32,
    pub body_size_pt: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
    /// Extra space after the title and after each record.
    pub block_gap_mm: f32,
}

impl Default for PageSetup {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 20.0,
            title_size_pt: 18.0,
            body_size_pt: 11.0,
            line_spacing: 1.5,
            block_gap_mm: 6.0,
        }
    }
}

impl PageSetup {
    fn line_height_mm(&self, size_pt: f32) -> f32 {
        size_pt * PT_TO_MM * self.line_spacing
    }

    fn text_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    fn top_mm(&self) -> f32 {
        self.height_mm - self.margin_mm
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub size_pt: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

pub type PageContent = Vec<PlacedText>;

/// Break `text` into lines no wider than `max_width_mm`.
///
/// Breaks fall between characters; a single character wider than the limit
/// still gets its own line.
pub fn wrap_line(
    text: &str,
    max_width_mm: f32,
    size_pt: f32,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for ch in text.chars() {
        let advance = measure.advance_mm(ch, size_pt);
        if !current.is_empty() && current_width + advance > max_width_mm {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.push(ch);
        current_width += advance;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out a centered title followed by text blocks, paginating as needed.
///
/// Each block is a list of logical lines; embedded newlines start new lines
/// and long lines wrap. Always returns at least one page.
pub fn layout_document(
    title: &str,
    blocks: &[Vec<String>],
    setup: &PageSetup,
    measure: &dyn TextMeasure,
) -> Vec<PageContent> {
    let mut pages: Vec<PageContent> = Vec::new();
    let mut page: PageContent = Vec::new();
    let mut cursor = setup.top_mm();

    cursor -= setup.line_height_mm(setup.title_size_pt);
    let title_width = measure.width_mm(title, setup.title_size_pt);
    let title_x = ((setup.width_mm - title_width) / 2.0).max(setup.margin_mm);
    page.push(PlacedText {
        text: title.to_string(),
        size_pt: setup.title_size_pt,
        x_mm: title_x,
        y_mm: cursor,
    });
    cursor -= setup.block_gap_mm;

    let line_height = setup.line_height_mm(setup.body_size_pt);
    for block in blocks {
        for logical in block {
            for raw in logical.split('\n') {
                let raw = raw.strip_suffix('\r').unwrap_or(raw);
                for line in wrap_line(raw, setup.text_width_mm(), setup.body_size_pt, measure) {
                    if cursor - line_height < setup.margin_mm {
                        pages.push(std::mem::take(&mut page));
                        cursor = setup.top_mm();
                    }
                    cursor -= line_height;
                    if !line.is_empty() {
                        page.push(PlacedText {
                            text: line,
                            size_pt: setup.body_size_pt,
                            x_mm: setup.margin_mm,
                            y_mm: cursor,
                        });
                    }
                }
            }
        }
        cursor -= setup.block_gap_mm;
    }

    pages.push(page);
    pages
}
