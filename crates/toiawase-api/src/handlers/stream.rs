//! Response bodies for file downloads.

use axum::{
    body::{Body, Bytes},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use tokio::io::AsyncReadExt;

use toiawase_export::{ExportArtifact, ExportFormat};

const CHUNK_SIZE: usize = 64 * 1024;

/// Stream a temporary export file as the response body.
///
/// The artifact moves into the stream, so the file is removed once the body
/// has been sent or the client goes away.
pub async fn artifact_body(artifact: ExportArtifact) -> std::io::Result<Body> {
    let mut file = artifact.open().await?;

    let stream = async_stream::stream! {
        let _artifact = artifact;
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            match file.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => yield Ok::<Bytes, std::io::Error>(Bytes::copy_from_slice(&buf[..n])),
                Err(e) => {
                    tracing::error!("Failed to read export artifact: {}", e);
                    yield Err(e);
                    break;
                }
            }
        }
    };

    Ok(Body::from_stream(stream))
}

/// Wrap a body as a downloadable attachment named after the export date.
pub fn attachment(format: ExportFormat, date: NaiveDate, body: Body) -> Response {
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, format.content_disposition(date)),
        ],
        body,
    )
        .into_response()
}
