//! Blob operations.
//!
//! Blob contents travel outside of rows: a row carries only the 8-byte
//! [`BlobId`]. Reading opens the blob within a transaction and pulls
//! segments until the server marks the end; writing creates a new blob,
//! sends segments of at most [`MAX_SEGMENT_SIZE`] bytes and closes it, after
//! which the id can be bound as a parameter.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let id = session.write_blob(tr, b"large payload").await?;
//! let data = session.read_blob(tr, id).await?;
//!
//! // Or segment by segment
//! let mut reader = BlobReader::open(&mut session, tr, id).await?;
//! while let Some(segment) = reader.next_segment().await? {
//!     process(&segment);
//! }
//! reader.close().await?;
//! ```

use bytes::{Bytes, BytesMut};
use firebird_protocol::{BlobId, MAX_SEGMENT_SIZE, Request};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::session::Session;

impl<T> Session<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Open an existing blob for reading; returns the blob handle.
    pub async fn open_blob(&mut self, tr: i32, id: BlobId) -> Result<i32> {
        let response = self.generic(&Request::OpenBlob { tr, id }).await?;
        tracing::trace!(blob = %id, handle = response.handle, "blob opened");
        Ok(response.handle)
    }

    /// Create a new blob for writing; returns its handle and id.
    pub async fn create_blob(&mut self, tr: i32) -> Result<(i32, BlobId)> {
        let response = self.generic(&Request::CreateBlob { tr }).await?;
        let id = response.blob_id();
        tracing::trace!(blob = %id, handle = response.handle, "blob created");
        Ok((response.handle, id))
    }

    /// Read the next batch of segments. The flag is set once the server
    /// reports the end of the blob.
    pub async fn get_segment(&mut self, blob: i32) -> Result<(Vec<Bytes>, bool)> {
        let buffer_length = self.info_buffer_length();
        let response = self
            .generic(&Request::GetSegment {
                blob,
                buffer_length,
            })
            .await?;
        let segments = response.segments()?;
        Ok((segments, response.is_segment_eof()))
    }

    /// Write `data` to an open blob, split into segments.
    pub async fn batch_segments(&mut self, blob: i32, data: &[u8]) -> Result<()> {
        for chunk in data.chunks(MAX_SEGMENT_SIZE) {
            self.generic(&Request::BatchSegments { blob, data: chunk })
                .await?;
        }
        Ok(())
    }

    /// Close a blob handle.
    pub async fn close_blob(&mut self, blob: i32) -> Result<()> {
        self.generic(&Request::CloseBlob { blob }).await?;
        Ok(())
    }

    /// Read a whole blob.
    pub async fn read_blob(&mut self, tr: i32, id: BlobId) -> Result<Bytes> {
        let mut reader = BlobReader::open(self, tr, id).await?;
        let data = reader.read_to_end().await?;
        reader.close().await?;
        Ok(data)
    }

    /// Store `data` as a new blob and return its id.
    pub async fn write_blob(&mut self, tr: i32, data: &[u8]) -> Result<BlobId> {
        let (handle, id) = self.create_blob(tr).await?;
        self.batch_segments(handle, data).await?;
        self.close_blob(handle).await?;
        tracing::debug!(blob = %id, len = data.len(), "blob written");
        Ok(id)
    }
}

/// Segment-by-segment reader over an open blob.
///
/// The reader borrows the session, so no other request can interleave with
/// the segment reads. Call [`BlobReader::close`] when done; a reader that is
/// dropped early leaves the blob handle open until the transaction ends.
pub struct BlobReader<'a, T>
where
    T: AsyncRead + AsyncWrite,
{
    session: &'a mut Session<T>,
    handle: i32,
    pending: std::vec::IntoIter<Bytes>,
    eof: bool,
    bytes_read: u64,
}

impl<'a, T> BlobReader<'a, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Open the blob `id` within transaction `tr`.
    pub async fn open(session: &'a mut Session<T>, tr: i32, id: BlobId) -> Result<Self> {
        let handle = session.open_blob(tr, id).await?;
        Ok(Self {
            session,
            handle,
            pending: Vec::new().into_iter(),
            eof: false,
            bytes_read: 0,
        })
    }

    /// The server's blob handle.
    #[must_use]
    pub fn handle(&self) -> i32 {
        self.handle
    }

    /// Get the number of bytes read so far.
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Check if all data has been read.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.eof && self.pending.len() == 0
    }

    /// Read the next segment, or `None` at the end of the blob.
    pub async fn next_segment(&mut self) -> Result<Option<Bytes>> {
        loop {
            if let Some(segment) = self.pending.next() {
                self.bytes_read += segment.len() as u64;
                return Ok(Some(segment));
            }
            if self.eof {
                return Ok(None);
            }
            let (segments, eof) = self.session.get_segment(self.handle).await?;
            self.eof = eof;
            self.pending = segments.into_iter();
        }
    }

    /// Read every remaining segment into one buffer.
    pub async fn read_to_end(&mut self) -> Result<Bytes> {
        let mut data = BytesMut::new();
        while let Some(segment) = self.next_segment().await? {
            data.extend_from_slice(&segment);
        }
        Ok(data.freeze())
    }

    /// Close the blob handle.
    pub async fn close(self) -> Result<()> {
        self.session.close_blob(self.handle).await
    }
}

impl<T> std::fmt::Debug for BlobReader<'_, T>
where
    T: AsyncRead + AsyncWrite,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobReader")
            .field("handle", &self.handle)
            .field("eof", &self.eof)
            .field("bytes_read", &self.bytes_read)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use firebird_protocol::codec::{put_bytes, put_i32};
    use firebird_protocol::{EmptyCatalog, OpCode};
    use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

    fn response(handle: i32, object_id: [u8; 8], data: &[u8]) -> BytesMut {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, OpCode::Response.as_i32());
        put_i32(&mut buf, handle);
        buf.extend_from_slice(&object_id);
        put_bytes(&mut buf, data);
        put_i32(&mut buf, 0);
        buf
    }

    fn segments(parts: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        for part in parts {
            out.extend_from_slice(&(part.len() as u16).to_le_bytes());
            out.extend_from_slice(part);
        }
        out
    }

    #[tokio::test]
    async fn test_read_blob_until_eof() {
        let (client, mut server) = duplex(8192);
        let mut session = Session::from_stream(client, Arc::new(EmptyCatalog), 1024);

        let mut script = BytesMut::new();
        // open_blob
        script.extend_from_slice(&response(9, [0; 8], &[]));
        // two get_segment replies: more data, then eof (handle 2)
        script.extend_from_slice(&response(1, [0; 8], &segments(&[b"hello ", b"big "])));
        script.extend_from_slice(&response(2, [0; 8], &segments(&[b"world"])));
        // close_blob
        script.extend_from_slice(&response(0, [0; 8], &[]));
        server.write_all(&script).await.unwrap();

        let data = session
            .read_blob(1, BlobId([0, 0, 0, 1, 0, 0, 0, 5]))
            .await
            .unwrap();
        assert_eq!(&data[..], b"hello big world");
    }

    #[tokio::test]
    async fn test_write_blob_splits_segments() {
        let (client, mut server) = duplex(256 * 1024);
        let mut session = Session::from_stream(client, Arc::new(EmptyCatalog), 1024);

        let id = [0, 0, 0, 7, 0, 0, 0, 1];
        let mut script = BytesMut::new();
        script.extend_from_slice(&response(4, id, &[]));
        for _ in 0..3 {
            script.extend_from_slice(&response(0, [0; 8], &[]));
        }
        server.write_all(&script).await.unwrap();

        let payload = vec![0xAB; MAX_SEGMENT_SIZE + 10];
        let blob = session.write_blob(1, &payload).await.unwrap();
        assert_eq!(blob, BlobId(id));

        // create_blob2: op + bpb + tr + quad
        let mut head = [0u8; 20];
        server.read_exact(&mut head).await.unwrap();
        assert_eq!(
            i32::from_be_bytes(head[..4].try_into().unwrap()),
            OpCode::CreateBlob2.as_i32()
        );

        // First batch carries a full segment.
        let mut batch = [0u8; 16];
        server.read_exact(&mut batch).await.unwrap();
        assert_eq!(
            i32::from_be_bytes(batch[..4].try_into().unwrap()),
            OpCode::BatchSegments.as_i32()
        );
        assert_eq!(i32::from_be_bytes(batch[4..8].try_into().unwrap()), 4);
        assert_eq!(
            i32::from_be_bytes(batch[8..12].try_into().unwrap()),
            (MAX_SEGMENT_SIZE + 2) as i32
        );
    }
}
