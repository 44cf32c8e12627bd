//! The protocol session: one transport, one attached database, strictly
//! sequential request/response exchanges.
//!
//! Every public operation sends exactly one request and consumes its whole
//! response before returning. Fetch is the one operation whose response
//! spans several frames; they are all read before the call returns.
//!
//! ## Poisoning
//!
//! A transport failure or a response that does not match the outstanding
//! request leaves the stream at an unknown position. The session moves to
//! [`SessionState::Poisoned`] and refuses further requests. Errors reported
//! by the engine in a status vector leave the session usable.

use std::sync::Arc;

use bytes::Bytes;
use firebird_codec::{CloseHandle, Connection};
use firebird_protocol::info::{
    self, continuation_items, parse_continuation, parse_record_counts, parse_statement_info,
    prepare_items, records_items,
};
use firebird_protocol::response::RawRow;
use firebird_protocol::{
    AttachParams, DescribedVars, Expect, FreeMode, GenericResponse, MessageCatalog, MessageRef,
    OpCode, ProtocolError, ProtocolVersion, RecordCounts, Request, Response, Section,
    StatementInfo, XSqlVar,
};
use firebird_types::EncodedMessage;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::state::SessionState;

/// Rows returned by one fetch round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchBatch {
    /// Raw rows, in server order.
    pub rows: Vec<RawRow>,
    /// Whether the cursor has no more rows.
    pub exhausted: bool,
}

/// A protocol session over a transport.
pub struct Session<T = TcpStream>
where
    T: AsyncRead + AsyncWrite,
{
    conn: Connection<T>,
    state: SessionState,
    protocol: Option<ProtocolVersion>,
    db: Option<i32>,
    catalog: Arc<dyn MessageCatalog>,
    info_buffer_length: i32,
    /// Statements whose release was deferred by a dropped cursor.
    pending_frees: Vec<(i32, FreeMode)>,
}

impl Session<TcpStream> {
    /// Open a TCP connection to the configured server and negotiate the
    /// protocol.
    pub async fn connect(config: &Config) -> Result<Self> {
        let addr = config.address();
        tracing::debug!(address = %addr, "establishing TCP connection");

        let stream = timeout(config.timeouts.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| Error::ConnectionTimeout)??;
        stream.set_nodelay(true)?;

        let mut session = Self::from_stream(
            stream,
            Arc::clone(&config.catalog),
            config.info_buffer_length,
        );
        session.handshake(&config.database).await?;
        Ok(session)
    }
}

impl<T> Session<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already-connected transport. No bytes are exchanged.
    pub fn from_stream(
        transport: T,
        catalog: Arc<dyn MessageCatalog>,
        info_buffer_length: i32,
    ) -> Self {
        Self {
            conn: Connection::new(transport),
            state: SessionState::Disconnected,
            protocol: None,
            db: None,
            catalog,
            info_buffer_length,
            pending_frees: Vec::new(),
        }
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Negotiated protocol version, once the handshake has completed.
    #[must_use]
    pub fn protocol_version(&self) -> Option<ProtocolVersion> {
        self.protocol
    }

    /// Handle of the attached database.
    pub fn db_handle(&self) -> Result<i32> {
        self.db
            .ok_or_else(|| Error::InvalidState(format!("no database attached ({})", self.state)))
    }

    /// Get a handle that can close the transport from another task.
    #[must_use]
    pub fn close_handle(&self) -> CloseHandle<T> {
        self.conn.close_handle()
    }

    pub(crate) fn info_buffer_length(&self) -> i32 {
        self.info_buffer_length
    }

    /// The message catalog used to render server errors.
    #[must_use]
    pub fn catalog(&self) -> &dyn MessageCatalog {
        self.catalog.as_ref()
    }

    /// Negotiate the protocol with `op_connect`.
    ///
    /// `op_reject` closes the session and yields [`Error::Rejected`].
    pub async fn handshake(&mut self, path: &str) -> Result<ProtocolVersion> {
        self.expect_state(SessionState::Disconnected)?;
        self.state = SessionState::Handshaking;

        let user = os_user();
        let host = host_name();
        let request = Request::Connect {
            path,
            user: &user,
            host: &host,
        };

        match self.round_trip(&request, Expect::Accept).await? {
            Response::Accept(accept) => {
                tracing::info!(
                    version = accept.version.raw(),
                    architecture = accept.architecture,
                    packet_type = accept.packet_type,
                    "protocol accepted"
                );
                self.protocol = Some(accept.version);
                self.state = SessionState::Connected;
                Ok(accept.version)
            }
            Response::Reject => {
                tracing::warn!("server rejected the connection");
                self.state = SessionState::Closed;
                if let Err(e) = self.conn.close().await {
                    tracing::debug!(error = %e, "closing rejected transport");
                }
                Err(Error::Rejected)
            }
            other => Err(self.fail(unexpected_response("op_accept", &other))),
        }
    }

    /// Attach to an existing database.
    pub async fn attach(&mut self, path: &str, params: &AttachParams<'_>) -> Result<i32> {
        self.expect_state(SessionState::Connected)?;
        let dpb = params.attach_dpb()?;
        let response = self.generic(&Request::Attach { path, dpb: &dpb }).await?;
        self.attached(path, response.handle);
        Ok(response.handle)
    }

    /// Create a database and attach to it.
    pub async fn create_database(
        &mut self,
        path: &str,
        params: &AttachParams<'_>,
        page_size: i32,
    ) -> Result<i32> {
        self.expect_state(SessionState::Connected)?;
        let dpb = params.create_dpb(page_size)?;
        let response = self.generic(&Request::Create { path, dpb: &dpb }).await?;
        self.attached(path, response.handle);
        Ok(response.handle)
    }

    fn attached(&mut self, path: &str, handle: i32) {
        tracing::info!(database = %path, handle, "database attached");
        self.db = Some(handle);
        self.state = SessionState::Attached;
    }

    /// Detach from the database and close the transport.
    pub async fn detach(&mut self) -> Result<()> {
        let db = self.db_handle()?;
        self.generic(&Request::Detach { db }).await?;
        tracing::info!(handle = db, "database detached");
        self.db = None;
        self.close().await
    }

    /// Drop the attached database and close the transport.
    pub async fn drop_database(&mut self) -> Result<()> {
        let db = self.db_handle()?;
        self.generic(&Request::DropDatabase { db }).await?;
        tracing::info!(handle = db, "database dropped");
        self.db = None;
        self.close().await
    }

    /// Close the transport without detaching.
    pub async fn close(&mut self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        self.state = SessionState::Closed;
        self.conn.close().await?;
        Ok(())
    }

    // ---- transactions ----

    /// Start a transaction described by `tpb`.
    pub async fn begin_transaction(&mut self, tpb: &[u8]) -> Result<i32> {
        let db = self.db_handle()?;
        let response = self.generic(&Request::Transaction { db, tpb }).await?;
        tracing::debug!(handle = response.handle, "transaction started");
        Ok(response.handle)
    }

    /// Commit and end a transaction.
    pub async fn commit(&mut self, tr: i32) -> Result<()> {
        self.generic(&Request::Commit { tr }).await?;
        tracing::debug!(handle = tr, "transaction committed");
        Ok(())
    }

    /// Commit, keeping the transaction open.
    pub async fn commit_retaining(&mut self, tr: i32) -> Result<()> {
        self.generic(&Request::CommitRetaining { tr }).await?;
        Ok(())
    }

    /// Roll back and end a transaction.
    pub async fn rollback(&mut self, tr: i32) -> Result<()> {
        self.generic(&Request::Rollback { tr }).await?;
        tracing::debug!(handle = tr, "transaction rolled back");
        Ok(())
    }

    /// Roll back, keeping the transaction open.
    pub async fn rollback_retaining(&mut self, tr: i32) -> Result<()> {
        self.generic(&Request::RollbackRetaining { tr }).await?;
        Ok(())
    }

    // ---- statements ----

    /// Allocate a statement handle.
    pub async fn allocate_statement(&mut self) -> Result<i32> {
        let db = self.db_handle()?;
        let response = self.generic(&Request::AllocateStatement { db }).await?;
        Ok(response.handle)
    }

    /// Prepare `sql` on an allocated statement and describe it.
    ///
    /// Descriptions cut short by the server's info buffer are completed
    /// with follow-up `op_info_sql` requests.
    pub async fn prepare(&mut self, tr: i32, stmt: i32, sql: &str) -> Result<StatementInfo> {
        tracing::debug!(statement = stmt, sql = %sql, "preparing");
        let items = prepare_items();
        let buffer_length = self.info_buffer_length;
        let response = self
            .generic(&Request::Prepare {
                tr,
                stmt,
                sql,
                items: &items,
                buffer_length,
            })
            .await?;

        let mut info = parse_statement_info(&response.data)?;
        let select_truncated = info.select.as_ref().is_some_and(|s| !s.is_complete());

        if let Some(select) = info.select.as_mut() {
            self.complete_section(stmt, Section::Select, select).await?;
        }
        match info.bind.as_mut() {
            Some(bind) => self.complete_section(stmt, Section::Bind, bind).await?,
            // The select section ran out of room before bind was reached.
            None if select_truncated => {
                let mut bind = DescribedVars {
                    vars: Vec::new(),
                    resume_at: Some(1),
                };
                self.complete_section(stmt, Section::Bind, &mut bind).await?;
                info.bind = Some(bind);
            }
            None => {}
        }

        tracing::debug!(
            statement = stmt,
            stmt_type = ?info.stmt_type,
            columns = info.select.as_ref().map_or(0, |s| s.vars.len()),
            params = info.bind.as_ref().map_or(0, |s| s.vars.len()),
            "prepared"
        );
        Ok(info)
    }

    async fn complete_section(
        &mut self,
        stmt: i32,
        section: Section,
        described: &mut DescribedVars,
    ) -> Result<()> {
        while let Some(index) = described.resume_at {
            tracing::trace!(statement = stmt, ?section, index, "describe continuation");
            let items = continuation_items(section, index);
            let data = self.info_sql(stmt, &items).await?;
            parse_continuation(&data, section, described)?;
            if described.resume_at.is_some_and(|next| next <= index) {
                return Err(ProtocolError::InvalidInfo(format!(
                    "describe continuation made no progress at variable {index}"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Request statement information.
    pub async fn info_sql(&mut self, stmt: i32, items: &[u8]) -> Result<Bytes> {
        let buffer_length = self.info_buffer_length;
        let response = self
            .generic(&Request::InfoSql {
                stmt,
                items,
                buffer_length,
            })
            .await?;
        Ok(response.data)
    }

    /// Affected record counts of the last execution.
    pub async fn records(&mut self, stmt: i32) -> Result<RecordCounts> {
        let data = self.info_sql(stmt, &records_items()).await?;
        Ok(parse_record_counts(&data)?)
    }

    /// Execute a prepared statement.
    pub async fn execute(
        &mut self,
        stmt: i32,
        tr: i32,
        params: Option<&EncodedMessage>,
    ) -> Result<()> {
        let params = params.map(message_ref);
        self.generic(&Request::Execute { stmt, tr, params }).await?;
        Ok(())
    }

    /// Execute a statement that returns at most one row.
    ///
    /// The reply is `op_sql_response` carrying the row, then a generic
    /// response with the status.
    pub async fn execute2(
        &mut self,
        stmt: i32,
        tr: i32,
        params: Option<&EncodedMessage>,
        output_blr: &[u8],
        columns: Arc<[XSqlVar]>,
    ) -> Result<Option<RawRow>> {
        let request = Request::Execute2 {
            stmt,
            tr,
            params: params.map(message_ref),
            output_blr,
        };
        match self.round_trip(&request, Expect::SqlResponse(columns)).await? {
            Response::Sql(sql) => {
                self.check(sql.response)?;
                Ok(sql.row)
            }
            Response::Generic(response) => {
                self.check(response)?;
                Ok(None)
            }
            other => Err(self.fail(unexpected_response("op_sql_response", &other))),
        }
    }

    /// Fetch up to `count` rows from an open cursor.
    pub async fn fetch(
        &mut self,
        stmt: i32,
        blr: &[u8],
        columns: Arc<[XSqlVar]>,
        count: i32,
    ) -> Result<FetchBatch> {
        let expect = Expect::Fetch(Arc::clone(&columns));
        let mut response = self
            .round_trip(&Request::Fetch { stmt, blr, count }, expect.clone())
            .await?;

        let mut batch = FetchBatch::default();
        loop {
            match response {
                Response::Fetch(frame) => {
                    if frame.ends_batch() {
                        batch.exhausted = frame.is_exhausted();
                        break;
                    }
                    if let Some(row) = frame.row {
                        batch.rows.push(row);
                    }
                }
                Response::Generic(generic) => {
                    self.check(generic)?;
                    batch.exhausted = true;
                    break;
                }
                other => return Err(self.fail(unexpected_response("op_fetch_response", &other))),
            }
            response = self.recv_response(expect.clone()).await?;
        }

        // A batch that yields nothing can only be the end.
        if batch.rows.is_empty() {
            batch.exhausted = true;
        }
        tracing::trace!(
            statement = stmt,
            rows = batch.rows.len(),
            exhausted = batch.exhausted,
            "fetched batch"
        );
        Ok(batch)
    }

    /// Close the cursor of, or drop, a statement.
    pub async fn free_statement(&mut self, stmt: i32, mode: FreeMode) -> Result<()> {
        self.generic(&Request::FreeStatement { stmt, mode }).await?;
        Ok(())
    }

    /// Queue a statement release to be sent before the next request.
    pub(crate) fn defer_free(&mut self, stmt: i32, mode: FreeMode) {
        match self
            .pending_frees
            .iter_mut()
            .find(|(pending, _)| *pending == stmt)
        {
            // Drop supersedes close.
            Some(entry) => {
                if mode == FreeMode::Drop {
                    entry.1 = FreeMode::Drop;
                }
            }
            None => self.pending_frees.push((stmt, mode)),
        }
    }

    /// Execute SQL without preparing it. Used for statements with neither
    /// parameters nor results, such as DDL.
    pub async fn exec_immediate(&mut self, tr: i32, sql: &str) -> Result<()> {
        let db = self.db_handle()?;
        tracing::debug!(sql = %sql, "executing immediately");
        self.generic(&Request::ExecImmediate {
            tr,
            db,
            sql,
            buffer_length: 0,
        })
        .await?;
        Ok(())
    }

    // ---- info ----

    /// Request database information; returns `(item, data)` clusters.
    pub async fn info_database(&mut self, items: &[u8]) -> Result<Vec<(u8, Bytes)>> {
        let db = self.db_handle()?;
        let buffer_length = self.info_buffer_length;
        let response = self
            .generic(&Request::InfoDatabase {
                db,
                items,
                buffer_length,
            })
            .await?;
        Ok(info::parse_info_items(&response.data)?)
    }

    /// Request transaction information; returns `(item, data)` clusters.
    pub async fn info_transaction(&mut self, tr: i32, items: &[u8]) -> Result<Vec<(u8, Bytes)>> {
        let buffer_length = self.info_buffer_length;
        let response = self
            .generic(&Request::InfoTransaction {
                tr,
                items,
                buffer_length,
            })
            .await?;
        Ok(info::parse_info_items(&response.data)?)
    }

    // ---- plumbing ----

    /// Send a request expecting a generic response and check its status.
    pub(crate) async fn generic(&mut self, request: &Request<'_>) -> Result<GenericResponse> {
        match self.round_trip(request, Expect::Generic).await? {
            Response::Generic(response) => self.check(response),
            other => Err(self.fail(unexpected_response("op_response", &other))),
        }
    }

    /// Turn an error status into [`Error::Server`].
    fn check(&self, response: GenericResponse) -> Result<GenericResponse> {
        let diagnostic = response.status.resolve(self.catalog.as_ref());
        if diagnostic.is_error() {
            tracing::debug!(
                sql_code = diagnostic.sql_code,
                gds_codes = ?diagnostic.gds_codes,
                "server error: {}",
                diagnostic.message
            );
            return Err(diagnostic.into());
        }
        if !diagnostic.warnings.is_empty() {
            tracing::debug!(warnings = ?diagnostic.warnings, "server warnings");
        }
        Ok(response)
    }

    async fn round_trip(&mut self, request: &Request<'_>, expect: Expect) -> Result<Response> {
        if !self.state.is_usable() {
            return Err(Error::InvalidState(format!("session is {}", self.state)));
        }
        self.flush_frees().await?;
        self.send_request(request).await?;
        self.recv_response(expect).await
    }

    async fn flush_frees(&mut self) -> Result<()> {
        for (stmt, mode) in std::mem::take(&mut self.pending_frees) {
            tracing::trace!(statement = stmt, ?mode, "releasing deferred statement");
            self.send_request(&Request::FreeStatement { stmt, mode })
                .await?;
            match self.recv_response(Expect::Generic).await? {
                Response::Generic(response) => {
                    // The statement may already be gone; nothing to recover.
                    if let Err(e) = self.check(response) {
                        tracing::debug!(statement = stmt, error = %e, "deferred free failed");
                    }
                }
                other => return Err(self.fail(unexpected_response("op_response", &other))),
            }
        }
        Ok(())
    }

    async fn send_request(&mut self, request: &Request<'_>) -> Result<()> {
        let encoded = request.encode()?.freeze();
        tracing::trace!(op = ?request.op(), len = encoded.len(), "sending request");
        match self.conn.send(encoded).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    async fn recv_response(&mut self, expect: Expect) -> Result<Response> {
        match self.conn.recv(expect).await {
            Ok(response) => Ok(response),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Poison the session if `error` leaves the stream unusable.
    fn fail(&mut self, error: Error) -> Error {
        if error.is_connection_lost() && self.state.is_usable() {
            tracing::warn!(state = %self.state, error = %error, "session poisoned");
            self.state = SessionState::Poisoned;
        }
        error
    }

    fn expect_state(&self, expected: SessionState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState(format!(
                "expected {expected} session, found {}",
                self.state
            )))
        }
    }
}

impl<T> std::fmt::Debug for Session<T>
where
    T: AsyncRead + AsyncWrite,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("protocol", &self.protocol)
            .field("db", &self.db)
            .field("pending_frees", &self.pending_frees.len())
            .finish_non_exhaustive()
    }
}

fn message_ref(message: &EncodedMessage) -> MessageRef<'_> {
    MessageRef {
        blr: &message.blr,
        data: &message.data,
    }
}

/// An [`Error::Protocol`] for a response variant the request cannot produce.
fn unexpected_response(expected: &'static str, response: &Response) -> Error {
    let actual = match response {
        Response::Accept(_) => OpCode::Accept,
        Response::Reject => OpCode::Reject,
        Response::Generic(_) => OpCode::Response,
        Response::Sql(_) => OpCode::SqlResponse,
        Response::Fetch(_) => OpCode::FetchResponse,
    };
    ProtocolError::UnexpectedOp {
        expected,
        actual: actual.as_i32(),
    }
    .into()
}

fn os_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

fn host_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use firebird_protocol::codec::{put_bytes, put_i32};
    use firebird_protocol::EmptyCatalog;
    use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, duplex};

    fn session(stream: DuplexStream) -> Session<DuplexStream> {
        Session::from_stream(stream, Arc::new(EmptyCatalog), 1024)
    }

    fn generic_ok(handle: i32) -> BytesMut {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, OpCode::Response.as_i32());
        put_i32(&mut buf, handle);
        buf.extend_from_slice(&[0; 8]);
        put_bytes(&mut buf, &[]);
        put_i32(&mut buf, 0);
        buf
    }

    fn generic_error(sql_code: i32) -> BytesMut {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, OpCode::Response.as_i32());
        put_i32(&mut buf, 0);
        buf.extend_from_slice(&[0; 8]);
        put_bytes(&mut buf, &[]);
        // gds 335544436 (sqlerr), number arg, end
        for v in [1, 335_544_436, 4, sql_code, 0] {
            put_i32(&mut buf, v);
        }
        buf
    }

    fn accept() -> BytesMut {
        let mut buf = BytesMut::new();
        for v in [OpCode::Accept.as_i32(), 10, 1, 3] {
            put_i32(&mut buf, v);
        }
        buf
    }

    async fn attached(server: &mut DuplexStream, client: &mut Session<DuplexStream>) {
        server.write_all(&accept()).await.unwrap();
        client.handshake("/db").await.unwrap();
        server.write_all(&generic_ok(7)).await.unwrap();
        client.attach("/db", &attach_params()).await.unwrap();
    }

    fn attach_params() -> AttachParams<'static> {
        AttachParams {
            user: "SYSDBA",
            password: "masterkey",
            charset: "UTF8",
            role: None,
        }
    }

    async fn read_op(server: &mut DuplexStream) -> i32 {
        let mut op = [0u8; 4];
        server.read_exact(&mut op).await.unwrap();
        i32::from_be_bytes(op)
    }

    /// Consume the connect and attach requests `attached` sent.
    async fn drain_attach(server: &mut DuplexStream) {
        let (user, host) = (os_user(), host_name());
        let connect = Request::Connect {
            path: "/db",
            user: &user,
            host: &host,
        }
        .encode()
        .unwrap();
        let dpb = attach_params().attach_dpb().unwrap();
        let attach = Request::Attach {
            path: "/db",
            dpb: &dpb,
        }
        .encode()
        .unwrap();

        assert_eq!(read_op(server).await, OpCode::Connect.as_i32());
        let mut rest = vec![0u8; connect.len() - 4];
        server.read_exact(&mut rest).await.unwrap();
        assert_eq!(&rest[..], &connect[4..]);

        assert_eq!(read_op(server).await, OpCode::Attach.as_i32());
        let mut rest = vec![0u8; attach.len() - 4];
        server.read_exact(&mut rest).await.unwrap();
        assert_eq!(&rest[..], &attach[4..]);
    }

    #[tokio::test]
    async fn test_handshake_and_attach() {
        let (client, mut server) = duplex(4096);
        let mut client = session(client);
        attached(&mut server, &mut client).await;

        assert_eq!(client.state(), SessionState::Attached);
        assert_eq!(client.protocol_version(), Some(ProtocolVersion::V10));
        assert_eq!(client.db_handle().unwrap(), 7);

        let mut op = [0u8; 4];
        server.read_exact(&mut op).await.unwrap();
        assert_eq!(i32::from_be_bytes(op), OpCode::Connect.as_i32());
    }

    #[tokio::test]
    async fn test_overlong_password_is_not_sent() {
        let (client, mut server) = duplex(4096);
        let mut client = session(client);
        server.write_all(&accept()).await.unwrap();
        client.handshake("/db").await.unwrap();

        let password = "p".repeat(300);
        let params = AttachParams {
            user: "SYSDBA",
            password: &password,
            charset: "UTF8",
            role: None,
        };
        let err = client.attach("/db", &params).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::ValueTooLong { len: 300, .. })
        ));
        assert!(!err.is_connection_lost());
        assert_eq!(client.state(), SessionState::Connected);
    }

    #[tokio::test]
    async fn test_reject_closes_session() {
        let (client, mut server) = duplex(4096);
        let mut client = session(client);

        let mut reject = BytesMut::new();
        put_i32(&mut reject, OpCode::Reject.as_i32());
        server.write_all(&reject).await.unwrap();

        let err = client.handshake("/db").await.unwrap_err();
        assert!(matches!(err, Error::Rejected));
        assert_eq!(client.state(), SessionState::Closed);
    }

    #[tokio::test]
    async fn test_engine_error_keeps_session_usable() {
        let (client, mut server) = duplex(4096);
        let mut client = session(client);
        attached(&mut server, &mut client).await;

        server.write_all(&generic_error(-104)).await.unwrap();
        let err = client.begin_transaction(&[3]).await.unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(err.sql_code(), Some(-104));
        assert_eq!(client.state(), SessionState::Attached);

        server.write_all(&generic_ok(11)).await.unwrap();
        let tr = tokio_test::assert_ok!(client.begin_transaction(&[3]).await);
        assert_eq!(tr, 11);
    }

    #[tokio::test]
    async fn test_desync_poisons_session() {
        let (client, mut server) = duplex(4096);
        let mut client = session(client);
        attached(&mut server, &mut client).await;

        let mut wrong = BytesMut::new();
        put_i32(&mut wrong, OpCode::FetchResponse.as_i32());
        put_i32(&mut wrong, 0);
        put_i32(&mut wrong, 0);
        server.write_all(&wrong).await.unwrap();

        let err = client.commit(1).await.unwrap_err();
        assert!(err.is_connection_lost());
        assert_eq!(client.state(), SessionState::Poisoned);

        let err = client.commit(1).await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_deferred_free_is_sent_first() {
        let (client, mut server) = duplex(4096);
        let mut client = session(client);
        attached(&mut server, &mut client).await;

        drain_attach(&mut server).await;

        client.defer_free(5, FreeMode::Close);
        client.defer_free(5, FreeMode::Drop);
        let mut replies = generic_ok(0);
        replies.extend_from_slice(&generic_ok(0));
        server.write_all(&replies).await.unwrap();
        client.commit(3).await.unwrap();

        // One free for the handle, drop superseding close, ahead of the commit.
        assert_eq!(read_op(&mut server).await, OpCode::FreeStatement.as_i32());
        assert_eq!(read_op(&mut server).await, 5);
        assert_eq!(read_op(&mut server).await, FreeMode::Drop as i32);
        assert_eq!(read_op(&mut server).await, OpCode::Commit.as_i32());
        assert_eq!(read_op(&mut server).await, 3);
    }

    #[tokio::test]
    async fn test_operations_require_attach() {
        let (client, _server) = duplex(64);
        let mut client = session(client);
        assert!(matches!(
            client.allocate_statement().await,
            Err(Error::InvalidState(_))
        ));
    }
}
