//! Decodes a v2 response body into its constituent frames and routes them
//! into a consumable dataset.
//!
//! Two framing shapes are supported: a whole, buffered JSON array
//! ([`parse_frames_full`], used for a non-progressive response already read
//! to completion) and a newline-delimited bracket-array stream
//! ([`parse_frames_iterative`], used by the progressive streaming path one
//! frame at a time). [`iterative`] routes either frame stream into a
//! [`IterativeDataset`](iterative::IterativeDataset); [`full::to_full`]
//! drains one into a fully materialized [`full::FullDataset`].

pub mod full;
pub mod iterative;

pub use full::{to_full, FullDataset};
pub use iterative::{
    FullTable, IterativeDataset, RowResult, StreamedRow, StreamingTable, Table, TableResult,
    DEFAULT_ROW_CHANNEL_CAPACITY,
};

use crate::error::Error::JsonError;
use crate::error::Result;
use crate::models::v2::Frame;
use futures::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, Stream};

/// Reads one JSON object per line from a `[` `]`-wrapped, newline-delimited
/// stream and yields each as a decoded [`Frame`].
pub fn parse_frames_iterative(
    reader: impl AsyncBufRead + Unpin,
) -> impl Stream<Item = Result<Frame>> {
    let buf = Vec::with_capacity(4096);
    futures::stream::unfold((reader, buf), |(mut reader, mut buf)| async move {
        buf.clear();
        let size = reader.read_until(b'\n', &mut buf).await.ok()?;
        if size <= 1 {
            return None;
        }
        let end = size - 1;

        if buf[0] == b']' {
            return None;
        }

        Some((
            serde_json::from_slice(&buf[1..end]).map_err(JsonError),
            (reader, buf),
        ))
    })
}

/// Reads an entire response body and parses it as a single JSON array of frames.
pub async fn parse_frames_full(mut reader: (impl AsyncBufRead + Send + Unpin)) -> Result<Vec<Frame>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(serde_json::from_slice(&buf)?)
}

#[cfg(test)]
mod tests {
    use crate::models::test_helpers::{v2_files_full, v2_files_iterative};
    use futures::io::Cursor;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_parse_frames_full() {
        for (contents, frames) in v2_files_full() {
            println!("testing: {}", contents);
            let reader = Cursor::new(contents.as_bytes());
            let parsed_frames = super::parse_frames_full(reader).await.unwrap();
            assert_eq!(parsed_frames, frames);
        }
    }

    #[tokio::test]
    async fn test_parse_frames_iterative() {
        for (contents, frames) in v2_files_iterative() {
            println!("testing: {}", contents);
            let reader = Cursor::new(contents.as_bytes());
            let parsed_frames = super::parse_frames_iterative(reader)
                .map(|f| f.expect("failed to parse frame"))
                .collect::<Vec<_>>()
                .await;
            assert_eq!(parsed_frames, frames);
        }
    }
}
