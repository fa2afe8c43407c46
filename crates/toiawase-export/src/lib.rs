//! Export of stored messages as CSV and PDF.
//!
//! Both formats render timestamps in Tokyo local time and take records in
//! the order the store returned them (newest first).

pub mod artifact;
pub mod csv_writer;
pub mod error;
pub mod format;
pub mod pdf;

pub use artifact::ExportArtifact;
pub use csv_writer::{spawn_csv_artifact, to_csv_bytes, write_csv, write_csv_artifact, CSV_HEADERS, UTF8_BOM};
pub use error::ExportError;
pub use format::{export_date, format_timestamp, ExportFormat, EXPORT_TIMEZONE, TIMESTAMP_FORMAT};
pub use pdf::{render_pdf, spawn_pdf, PdfFont};
