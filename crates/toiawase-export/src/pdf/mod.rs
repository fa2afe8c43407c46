mod font;
pub mod layout;

use chrono::NaiveDate;
use printpdf::{Mm, PdfDocument};
use toiawase_persist::DBMessage;

use crate::error::{ExportError, Result};
use crate::format::format_timestamp;

pub use font::{FontMetrics, PdfFont, REQUIRED_GLYPHS};
pub use layout::{layout_document, wrap_line, PageContent, PageSetup, PlacedText, TextMeasure};

const LAYER_NAME: &str = "messages";

pub fn pdf_title(export_date: NaiveDate) -> String {
    format!("メッセージ一覧 ({})", export_date.format("%Y-%m-%d"))
}

/// Logical lines printed for one record.
pub fn record_block(message: &DBMessage) -> Vec<String> {
    vec![
        format!("名前: {}", message.name),
        format!("メッセージ: {}", message.message),
        format!("日時: {}", format_timestamp(&message.created_at)),
    ]
}

/// Render messages into a complete PDF document held in memory.
pub fn render_pdf(
    messages: &[DBMessage],
    export_date: NaiveDate,
    font: &PdfFont,
) -> Result<Vec<u8>> {
    let setup = PageSetup::default();
    let title = pdf_title(export_date);
    let blocks: Vec<Vec<String>> = messages.iter().map(record_block).collect();

    let pages = {
        let metrics = font.metrics()?;
        layout_document(&title, &blocks, &setup, &metrics)
    };

    let (doc, first_page, first_layer) = PdfDocument::new(
        title.clone(),
        Mm(setup.width_mm),
        Mm(setup.height_mm),
        LAYER_NAME,
    );
    let embedded = doc
        .add_external_font(font.bytes())
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(setup.width_mm), Mm(setup.height_mm), LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for placed in page {
            layer.use_text(
                placed.text.as_str(),
                placed.size_pt,
                Mm(placed.x_mm),
                Mm(placed.y_mm),
                &embedded,
            );
        }
    }

    tracing::debug!(
        records = messages.len(),
        pages = pages.len(),
        "Rendered PDF export"
    );

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

/// [`render_pdf`] on the blocking pool.
pub async fn spawn_pdf(
    messages: Vec<DBMessage>,
    export_date: NaiveDate,
    font: PdfFont,
) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || render_pdf(&messages, export_date, &font)).await?
}
