//! Split I/O connection with a coarse close handle.
//!
//! The transport is split into read and write halves so that a
//! [`CloseHandle`] held by another task can shut the socket down and wake a
//! read that is blocked waiting for the server.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use firebird_protocol::{Expect, Response};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::{Mutex, Notify};

use crate::error::CodecError;
use crate::framed::{RequestWriter, ResponseReader};

/// A Firebird connection with split I/O.
///
/// Requests are written as already-encoded buffers; responses are decoded
/// according to the [`Expect`] passed to [`Connection::recv`]. The protocol
/// is half-duplex, so callers alternate `send` and `recv`.
///
/// # Example
///
/// ```rust,ignore
/// use firebird_codec::Connection;
/// use firebird_protocol::{Expect, Request};
///
/// let mut conn = Connection::new(stream);
/// let close = conn.close_handle();
///
/// conn.send(Request::Detach { db }.encode()?.freeze()).await?;
/// let response = conn.recv(Expect::Generic).await?;
/// ```
pub struct Connection<T>
where
    T: AsyncRead + AsyncWrite,
{
    /// Read half wrapped in a response reader.
    reader: ResponseReader<ReadHalf<T>>,
    /// Write half, shared with close handles.
    writer: Arc<Mutex<RequestWriter<WriteHalf<T>>>>,
    /// Wakes a pending read when the connection is closed.
    close_notify: Arc<Notify>,
    /// Set once the connection has been closed locally.
    closed: Arc<AtomicBool>,
}

impl<T> Connection<T>
where
    T: AsyncRead + AsyncWrite,
{
    /// Create a new connection from a transport.
    ///
    /// The transport is immediately split into read and write halves.
    pub fn new(transport: T) -> Self {
        let (read_half, write_half) = tokio::io::split(transport);

        Self {
            reader: ResponseReader::new(read_half),
            writer: Arc::new(Mutex::new(RequestWriter::new(write_half))),
            close_notify: Arc::new(Notify::new()),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a handle that can close this connection from another task.
    #[must_use]
    pub fn close_handle(&self) -> CloseHandle<T> {
        CloseHandle {
            writer: Arc::clone(&self.writer),
            notify: Arc::clone(&self.close_notify),
            closed: Arc::clone(&self.closed),
        }
    }

    /// Check whether the connection has been closed locally.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Bytes received but not yet decoded.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.reader.read_buffer().len()
    }
}

impl<T> Connection<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Write one encoded request and flush it.
    pub async fn send(&mut self, request: Bytes) -> Result<(), CodecError> {
        if self.is_closed() {
            return Err(CodecError::ConnectionClosed);
        }
        let mut writer = self.writer.lock().await;
        writer.send(request).await
    }

    /// Read the next response, decoded as `expect` describes.
    ///
    /// Returns [`CodecError::ConnectionClosed`] when the peer closes the
    /// stream or a [`CloseHandle`] closes the connection mid-read.
    pub async fn recv(&mut self, expect: Expect) -> Result<Response, CodecError> {
        self.reader.expect(expect);

        let notify = Arc::clone(&self.close_notify);
        let notified = notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.is_closed() {
            return Err(CodecError::ConnectionClosed);
        }

        tokio::select! {
            biased;
            () = &mut notified => {
                tracing::debug!("read interrupted by close");
                Err(CodecError::ConnectionClosed)
            }
            next = self.reader.next() => match next {
                Some(result) => result,
                None => Err(CodecError::ConnectionClosed),
            },
        }
    }

    /// Shut the write half down and mark the connection closed.
    pub async fn close(&mut self) -> Result<(), CodecError> {
        self.close_handle().close().await
    }
}

impl<T> std::fmt::Debug for Connection<T>
where
    T: AsyncRead + AsyncWrite,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("closed", &self.is_closed())
            .field("buffered", &self.buffered())
            .finish_non_exhaustive()
    }
}

/// Handle for closing a connection from another task.
///
/// Closing is coarse: the socket is shut down and any pending read fails
/// with [`CodecError::ConnectionClosed`]. The session that owned the
/// connection cannot be used afterwards.
pub struct CloseHandle<T>
where
    T: AsyncRead + AsyncWrite,
{
    writer: Arc<Mutex<RequestWriter<WriteHalf<T>>>>,
    notify: Arc<Notify>,
    closed: Arc<AtomicBool>,
}

impl<T> CloseHandle<T>
where
    T: AsyncRead + AsyncWrite,
{
    /// Close the connection. Closing twice is a no-op.
    pub async fn close(&self) -> Result<(), CodecError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        tracing::debug!("closing connection");
        self.notify.notify_waiters();

        let mut writer = self.writer.lock().await;
        writer.get_mut().shutdown().await?;
        Ok(())
    }

    /// Check whether the connection has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl<T> Clone for CloseHandle<T>
where
    T: AsyncRead + AsyncWrite,
{
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            notify: Arc::clone(&self.notify),
            closed: Arc::clone(&self.closed),
        }
    }
}

impl<T> std::fmt::Debug for CloseHandle<T>
where
    T: AsyncRead + AsyncWrite,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloseHandle")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, duplex};

    fn generic_response(handle: i32) -> Vec<u8> {
        let mut buf = BytesMut::new();
        buf.put_i32(9);
        buf.put_i32(handle);
        buf.put_slice(&[0; 8]);
        buf.put_i32(0);
        buf.put_i32(0);
        buf.to_vec()
    }

    #[tokio::test]
    async fn test_send_reaches_peer() {
        let (client, mut server) = duplex(1024);
        let mut conn = Connection::new(client);

        conn.send(Bytes::from_static(&[0, 0, 0, 21, 0, 0, 0, 1]))
            .await
            .unwrap();

        let mut buf = [0u8; 8];
        server.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, [0, 0, 0, 21, 0, 0, 0, 1]);
    }

    #[tokio::test]
    async fn test_recv_across_partial_writes() {
        let (client, mut server) = duplex(1024);
        let mut conn = Connection::new(client);

        let bytes = generic_response(42);
        let writer = tokio::spawn(async move {
            for chunk in bytes.chunks(5) {
                server.write_all(chunk).await.unwrap();
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
            server
        });

        let response = conn.recv(Expect::Generic).await.unwrap();
        assert!(matches!(response, Response::Generic(r) if r.handle == 42));
        drop(writer.await.unwrap());
    }

    #[tokio::test]
    async fn test_peer_close_is_connection_closed() {
        let (client, server) = duplex(64);
        let mut conn = Connection::new(client);
        drop(server);

        assert!(matches!(
            conn.recv(Expect::Generic).await,
            Err(CodecError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn test_close_handle_wakes_pending_read() {
        let (client, _server) = duplex(64);
        let mut conn = Connection::new(client);
        let handle = conn.close_handle();

        let closer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.close().await.unwrap();
        });

        let result = tokio::time::timeout(Duration::from_secs(5), conn.recv(Expect::Generic))
            .await
            .unwrap();
        assert!(matches!(result, Err(CodecError::ConnectionClosed)));
        closer.await.unwrap();

        assert!(conn.is_closed());
        assert!(matches!(
            conn.send(Bytes::from_static(&[0, 0, 0, 71])).await,
            Err(CodecError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn test_close_twice() {
        let (client, _server) = duplex(64);
        let mut conn = Connection::new(client);
        tokio_test::assert_ok!(conn.close().await);
        tokio_test::assert_ok!(conn.close().await);
    }
}
