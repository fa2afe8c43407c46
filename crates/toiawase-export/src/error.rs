use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("Invalid font: {0}")]
    InvalidFont(String),

    #[error("Font has no glyphs for {0:?}")]
    MissingGlyphs(Vec<char>),

    #[error("No PDF font available")]
    FontUnavailable,

    #[error("Export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ExportError>;
