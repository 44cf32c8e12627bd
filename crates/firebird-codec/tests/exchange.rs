//! Request/response exchanges over an in-memory duplex stream.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use bytes::{BufMut, BytesMut};
use firebird_codec::{CodecError, Connection};
use firebird_protocol::{Expect, FreeMode, Request, Response, SqlType, XSqlVar};
use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

fn put_generic(buf: &mut BytesMut, handle: i32) {
    buf.put_i32(9);
    buf.put_i32(handle);
    buf.put_slice(&[0; 8]);
    buf.put_i32(0);
    buf.put_i32(0);
}

#[tokio::test]
async fn test_handshake_exchange() {
    let (client, mut server) = duplex(4096);
    let mut conn = Connection::new(client);

    let request = Request::Connect {
        path: "/data/employee.fdb",
        user: "sysdba",
        host: "localhost",
    }
    .encode()
    .unwrap()
    .freeze();
    let sent = request.len();
    conn.send(request).await.unwrap();

    let mut received = vec![0u8; sent];
    server.read_exact(&mut received).await.unwrap();
    assert_eq!(&received[..4], &[0, 0, 0, 1]);

    let mut reply = BytesMut::new();
    reply.put_i32(71);
    reply.put_i32(3);
    reply.put_i32(10);
    reply.put_i32(1);
    reply.put_i32(3);
    server.write_all(&reply).await.unwrap();

    let Response::Accept(accept) = conn.recv(Expect::Accept).await.unwrap() else {
        panic!("expected op_accept");
    };
    assert_eq!(accept.version.raw(), 10);
}

#[tokio::test]
async fn test_fetch_frames_back_to_back() {
    let (client, mut server) = duplex(4096);
    let mut conn = Connection::new(client);
    let vars: Arc<[XSqlVar]> = Arc::from(vec![XSqlVar::new(SqlType::Long, 4)]);

    // Two rows and the batch terminator arrive in a single write.
    let mut reply = BytesMut::new();
    for value in [1, 2] {
        reply.put_i32(66);
        reply.put_i32(0);
        reply.put_i32(1);
        reply.put_i32(value);
        reply.put_i32(0);
    }
    reply.put_i32(66);
    reply.put_i32(100);
    reply.put_i32(0);
    server.write_all(&reply).await.unwrap();

    let mut rows = 0;
    loop {
        let Response::Fetch(frame) = conn.recv(Expect::Fetch(Arc::clone(&vars))).await.unwrap()
        else {
            panic!("expected op_fetch_response");
        };
        if frame.ends_batch() {
            assert!(frame.is_exhausted());
            break;
        }
        rows += 1;
    }
    assert_eq!(rows, 2);
    assert_eq!(conn.buffered(), 0);
}

#[tokio::test]
async fn test_unexpected_op_is_desync() {
    let (client, mut server) = duplex(4096);
    let mut conn = Connection::new(client);

    let request = Request::FreeStatement {
        stmt: 3,
        mode: FreeMode::Drop,
    }
    .encode()
    .unwrap()
    .freeze();
    conn.send(request).await.unwrap();

    let mut reply = BytesMut::new();
    reply.put_i32(66);
    reply.put_i32(0);
    reply.put_i32(0);
    put_generic(&mut reply, 0);
    server.write_all(&reply).await.unwrap();

    match conn.recv(Expect::Generic).await {
        Err(CodecError::Protocol(e)) => assert!(e.is_desync()),
        other => panic!("expected a desync, got {other:?}"),
    }
}
