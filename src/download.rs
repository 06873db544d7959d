//! Chunked delivery of the rendered invoice file.

use crate::clock::compact_timestamp;
use bytes::Bytes;
use chrono::NaiveDateTime;
use futures::stream::{self, BoxStream, StreamExt};
use std::io;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Filename offered to the browser, stamped with the download time.
pub fn download_filename(at: NaiveDateTime) -> String {
    format!("invoice-{}.pdf", compact_timestamp(at))
}

/// A file that can be streamed in fixed-size chunks, any number of times.
#[derive(Debug, Clone)]
pub struct ChunkedFile {
    path: PathBuf,
    chunk_size: usize,
}

impl ChunkedFile {
    pub fn new(path: impl Into<PathBuf>, chunk_size: usize) -> Self {
        Self {
            path: path.into(),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Opens the file and returns a lazy stream over its current contents.
    ///
    /// Every chunk holds exactly `chunk_size` bytes except possibly the last.
    /// Calling `open` again restarts from the first byte.
    pub async fn open(&self) -> io::Result<BoxStream<'static, io::Result<Bytes>>> {
        let file = File::open(&self.path).await?;
        let chunk_size = self.chunk_size;

        Ok(stream::try_unfold(Some(file), move |file| async move {
            let Some(mut file) = file else {
                return Ok(None);
            };
            let mut buf = vec![0u8; chunk_size];
            let filled = fill(&mut file, &mut buf).await?;
            if filled == 0 {
                return Ok(None);
            }
            buf.truncate(filled);
            // A short read means EOF, so the next poll ends the stream
            let next = if filled == chunk_size { Some(file) } else { None };
            Ok::<_, io::Error>(Some((Bytes::from(buf), next)))
        })
        .boxed())
    }
}

/// Reads until `buf` is full or the file ends; returns the byte count.
async fn fill(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
