//! Framed read and write halves.
//!
//! - `ResponseReader<T>` - Read-only stream of decoded responses
//! - `RequestWriter<T>` - Write-only sink of encoded requests
//!
//! `Connection` owns one of each over the split transport.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use firebird_protocol::{Expect, Response};
use futures_core::Stream;
use futures_util::Sink;
use pin_project_lite::pin_project;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::codec::WireCodec;
use crate::error::CodecError;

pin_project! {
    /// A read-only stream of server responses.
    pub struct ResponseReader<T> {
        #[pin]
        inner: FramedRead<T, WireCodec>,
    }
}

impl<T> ResponseReader<T>
where
    T: AsyncRead,
{
    /// Create a new response reader over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            inner: FramedRead::new(transport, WireCodec::new()),
        }
    }

    /// Set the shape of the next response.
    pub fn expect(&mut self, expect: Expect) {
        self.inner.decoder_mut().expect(expect);
    }

    /// Get a reference to the underlying transport.
    pub fn get_ref(&self) -> &T {
        self.inner.get_ref()
    }

    /// Get a reference to the read buffer.
    pub fn read_buffer(&self) -> &BytesMut {
        self.inner.read_buffer()
    }
}

impl<T> Stream for ResponseReader<T>
where
    T: AsyncRead + Unpin,
{
    type Item = Result<Response, CodecError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }
}

impl<T> std::fmt::Debug for ResponseReader<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseReader")
            .field("transport", self.inner.get_ref())
            .field("buffered", &self.inner.read_buffer().len())
            .finish()
    }
}

pin_project! {
    /// A write-only sink of encoded requests.
    pub struct RequestWriter<T> {
        #[pin]
        inner: FramedWrite<T, WireCodec>,
    }
}

impl<T> RequestWriter<T>
where
    T: AsyncWrite,
{
    /// Create a new request writer over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            inner: FramedWrite::new(transport, WireCodec::new()),
        }
    }

    /// Get a reference to the underlying transport.
    pub fn get_ref(&self) -> &T {
        self.inner.get_ref()
    }

    /// Get a mutable reference to the underlying transport.
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }
}

impl<T> Sink<Bytes> for RequestWriter<T>
where
    T: AsyncWrite + Unpin,
{
    type Error = CodecError;

    fn poll_ready(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.project().inner.poll_ready(cx)
    }

    fn start_send(self: Pin<&mut Self>, item: Bytes) -> Result<(), Self::Error> {
        self.project().inner.start_send(item)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.project().inner.poll_flush(cx)
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.project().inner.poll_close(cx)
    }
}

impl<T> std::fmt::Debug for RequestWriter<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestWriter")
            .field("transport", self.inner.get_ref())
            .finish()
    }
}
