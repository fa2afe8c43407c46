use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use toiawase_persist::DBMessage;

use crate::artifact::ExportArtifact;
use crate::error::{ExportError, Result};
use crate::format::format_timestamp;

/// Spreadsheet tools need this to pick UTF-8 over the system code page.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column titles: name, message, created-at.
pub const CSV_HEADERS: [&str; 3] = ["名前", "メッセージ", "作成日時"];

/// Write BOM, header and one fully quoted row per message.
pub fn write_csv<W: Write>(mut writer: W, messages: &[DBMessage]) -> Result<W> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADERS)?;
    for message in messages {
        let created_at = format_timestamp(&message.created_at);
        csv_writer.write_record([
            message.name.as_str(),
            message.message.as_str(),
            created_at.as_str(),
        ])?;
    }
    csv_writer.flush()?;

    csv_writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

pub fn to_csv_bytes(messages: &[DBMessage]) -> Result<Vec<u8>> {
    write_csv(Vec::new(), messages)
}

/// Write the CSV into a uniquely named file under `dir`.
///
/// The name carries the export date plus a random suffix, so concurrent
/// exports never share a file.
pub fn write_csv_artifact(
    dir: &Path,
    messages: &[DBMessage],
    date: NaiveDate,
) -> Result<ExportArtifact> {
    fs::create_dir_all(dir)?;

    let prefix = format!("messages_{}_", date.format("%Y-%m-%d"));
    let (file, temp_path) = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".csv")
        .tempfile_in(dir)?
        .into_parts();
    let artifact = ExportArtifact::new(temp_path);

    let writer = write_csv(BufWriter::new(file), messages)?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    tracing::debug!(
        path = %artifact.path().display(),
        rows = messages.len(),
        "Wrote CSV export artifact"
    );
    Ok(artifact)
}

/// [`write_csv_artifact`] on the blocking pool.
pub async fn spawn_csv_artifact(
    dir: PathBuf,
    messages: Vec<DBMessage>,
    date: NaiveDate,
) -> Result<ExportArtifact> {
    tokio::task::spawn_blocking(move || write_csv_artifact(&dir, &messages, date)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use toiawase_persist::NewMessage;

    fn message(name: &str, body: &str, hour: u32) -> DBMessage {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap();
        NewMessage::new(name, body).created_at(ts).into_message(format!("id-{hour}"))
    }

    fn parse(bytes: &[u8]) -> Vec<Vec<String>> {
        let body = bytes.strip_prefix(UTF8_BOM).expect("missing BOM");
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(body)
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_csv_layout() {
        let bytes = to_csv_bytes(&[message("Tanaka", "Hello", 3)]).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\"名前\",\"メッセージ\",\"作成日時\"");
        assert_eq!(lines[1], "\"Tanaka\",\"Hello\",\"2024/05/01 12:00:00\"");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_csv_escapes_quotes_and_keeps_newlines() {
        let bytes = to_csv_bytes(&[message("A \"B\"", "line1\nline2, more", 0)]).unwrap();
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert!(text.contains("\"A \"\"B\"\"\""));

        let rows = parse(&bytes);
        assert_eq!(rows[1][0], "A \"B\"");
        assert_eq!(rows[1][1], "line1\nline2, more");
    }

    #[test]
    fn test_csv_round_trip_preserves_order() {
        let messages = vec![
            message("Carol", "newest", 5),
            message("Bob", "こんにちは", 4),
            message("Alice", "oldest", 3),
        ];
        let rows = parse(&to_csv_bytes(&messages).unwrap());

        let expected: Vec<Vec<String>> = messages
            .iter()
            .map(|m| vec![m.name.clone(), m.message.clone(), format_timestamp(&m.created_at)])
            .collect();
        assert_eq!(&rows[1..], expected.as_slice());
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let rows = parse(&to_csv_bytes(&[]).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], CSV_HEADERS.map(str::to_string).to_vec());
    }

    #[test]
    fn test_artifacts_are_unique_and_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let messages = vec![message("Tanaka", "Hello", 1)];

        let first = write_csv_artifact(dir.path(), &messages, date).unwrap();
        let second = write_csv_artifact(dir.path(), &messages, date).unwrap();
        assert_ne!(first.path(), second.path());

        let name = first.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("messages_2024-05-01_"));
        assert!(name.ends_with(".csv"));

        let contents = std::fs::read(first.path()).unwrap();
        assert_eq!(contents, to_csv_bytes(&messages).unwrap());

        let (p1, p2) = (first.path().to_path_buf(), second.path().to_path_buf());
        drop(first);
        drop(second);
        assert!(!p1.exists());
        assert!(!p2.exists());
    }

    #[test]
    fn test_artifact_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("csv");
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let artifact = write_csv_artifact(&nested, &[], date).unwrap();
        assert!(artifact.path().starts_with(&nested));
    }
}
