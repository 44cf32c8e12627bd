//! Mock Firebird server for unit testing.
//!
//! This module provides a mock server that speaks protocol 10 over a real
//! TCP socket, so tests can drive the full client stack without a Firebird
//! installation.
//!
//! ## Features
//!
//! - Handles the connect/attach handshake, or rejects it on request
//! - Describes, executes and fetches statements scripted by SQL text
//! - Honors the client's info buffer size, truncating statement
//!   descriptions the way a real server does
//! - Stores blobs written by clients and serves them back in segments
//! - Records every request for later inspection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use firebird_testing::mock_server::{MockFirebirdServer, MockResponse};
//! use firebird_testing::fixtures::int_column;
//!
//! #[tokio::test]
//! async fn test_with_mock() {
//!     let server = MockFirebirdServer::builder()
//!         .with_response("SELECT 1 FROM rdb$database", MockResponse::scalar(int_column("ONE"), 1))
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let client = Client::connect(server.config()).await.unwrap();
//!     // ...
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use firebird_client::Config;
use firebird_protocol::codec::{get_array, get_bytes, get_i32, put_bytes, put_i32, put_raw};
use firebird_protocol::info::{INFO_END, INFO_TRUNCATED, SqlInfoItem, database, transaction};
use firebird_protocol::response::{FETCH_NO_MORE_ROWS, SEGMENT_EOF, decode_row};
use firebird_protocol::status::GDS_SQL_ERROR;
use firebird_protocol::version::{Architecture, PacketType};
use firebird_protocol::{
    BlobId, OpCode, ProtocolError, ProtocolVersion, SqlType, StatementType, StatusArg, XSqlVar,
};
use firebird_types::{SqlValue, decode_nullable, encode_row};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, broadcast};

/// Handle the mock returns for the attached database.
pub const DB_HANDLE: i32 = 1;

/// Database path reported in [`MockFirebirdServer::config`].
pub const DB_PATH: &str = "/mock/test.fdb";

/// `isc_dsql_error`.
const GDS_DSQL_ERROR: i32 = 335_544_569;
/// `isc_random`, whose template is its single argument.
const GDS_RANDOM: i32 = 335_544_382;
/// `isc_bad_segstr_handle`.
const GDS_BAD_BLOB_HANDLE: i32 = 335_544_328;
/// `isc_bad_segstr_id`.
const GDS_BAD_BLOB_ID: i32 = 335_544_329;
/// `isc_bad_req_handle`.
const GDS_BAD_STMT_HANDLE: i32 = 335_544_327;
/// `isc_unique_key_violation`.
const GDS_UNIQUE_VIOLATION: i32 = 335_544_665;

/// Sub-items of `isc_info_sql_records`.
mod records {
    pub const SELECTED: u8 = 13;
    pub const INSERTED: u8 = 14;
    pub const UPDATED: u8 = 15;
    pub const DELETED: u8 = 16;
}

/// Error type for mock server operations.
#[derive(Debug, Error)]
pub enum MockServerError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A request could not be decoded.
    #[error("wire error: {0}")]
    Wire(#[from] ProtocolError),

    /// The conversation broke protocol rules.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Result type for mock server operations.
pub type Result<T> = std::result::Result<T, MockServerError>;

/// A scripted reply to a statement.
///
/// The variant decides how the statement is described at prepare time and
/// what executing it produces.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// A `SELECT`: rows are served through fetches.
    Rows {
        /// Output column descriptors.
        columns: Vec<XSqlVar>,
        /// Row values, one vector per row.
        rows: Vec<Vec<SqlValue>>,
    },
    /// An `EXECUTE PROCEDURE`: at most one row, returned by `op_execute2`.
    Singleton {
        /// Output column descriptors.
        columns: Vec<XSqlVar>,
        /// The returned row.
        row: Option<Vec<SqlValue>>,
    },
    /// A statement without output, reporting affected records.
    Affected {
        /// Statement type reported at prepare time.
        stmt_type: StatementType,
        /// Records reported for the statement's kind.
        count: u64,
    },
    /// Prepare fails with this status vector.
    Error(Vec<StatusArg>),
    /// Raw bytes sent in place of the prepare response.
    Raw(Bytes),
}

impl MockResponse {
    /// A DDL statement with nothing to report.
    #[must_use]
    pub fn empty() -> Self {
        Self::Affected {
            stmt_type: StatementType::Ddl,
            count: 0,
        }
    }

    /// A result set.
    #[must_use]
    pub fn rows(columns: Vec<XSqlVar>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self::Rows { columns, rows }
    }

    /// A single-row, single-column result set.
    #[must_use]
    pub fn scalar(column: XSqlVar, value: impl Into<SqlValue>) -> Self {
        Self::Rows {
            columns: vec![column],
            rows: vec![vec![value.into()]],
        }
    }

    /// A procedure returning one row.
    #[must_use]
    pub fn singleton(columns: Vec<XSqlVar>, row: Vec<SqlValue>) -> Self {
        Self::Singleton {
            columns,
            row: Some(row),
        }
    }

    /// An `INSERT` affecting `count` rows.
    #[must_use]
    pub fn inserted(count: u64) -> Self {
        Self::Affected {
            stmt_type: StatementType::Insert,
            count,
        }
    }

    /// An `UPDATE` affecting `count` rows.
    #[must_use]
    pub fn updated(count: u64) -> Self {
        Self::Affected {
            stmt_type: StatementType::Update,
            count,
        }
    }

    /// A `DELETE` affecting `count` rows.
    #[must_use]
    pub fn deleted(count: u64) -> Self {
        Self::Affected {
            stmt_type: StatementType::Delete,
            count,
        }
    }

    /// A DSQL error the way the engine reports one: a "Dynamic SQL Error"
    /// header, the SQL code, then `message`.
    #[must_use]
    pub fn error(sql_code: i32, message: impl Into<String>) -> Self {
        Self::Error(vec![
            StatusArg::Gds(GDS_DSQL_ERROR),
            StatusArg::Gds(GDS_SQL_ERROR),
            StatusArg::Number(sql_code),
            StatusArg::Gds(GDS_RANDOM),
            StatusArg::Text(message.into()),
        ])
    }

    /// A unique constraint violation (SQL code -803).
    #[must_use]
    pub fn unique_violation(constraint: impl Into<String>, table: impl Into<String>) -> Self {
        Self::Error(vec![
            StatusArg::Gds(GDS_UNIQUE_VIOLATION),
            StatusArg::Text(constraint.into()),
            StatusArg::Text(table.into()),
            StatusArg::Gds(GDS_SQL_ERROR),
            StatusArg::Number(-803),
        ])
    }

    /// Bytes written verbatim instead of a well-formed reply.
    #[must_use]
    pub fn raw(bytes: impl Into<Bytes>) -> Self {
        Self::Raw(bytes.into())
    }

    /// Statement type and output columns announced at prepare time.
    fn shape(&self) -> Option<(StatementType, &[XSqlVar])> {
        match self {
            Self::Rows { columns, .. } => Some((StatementType::Select, columns)),
            Self::Singleton { columns, .. } => Some((StatementType::ExecProcedure, columns)),
            Self::Affected { stmt_type, .. } => Some((*stmt_type, &[])),
            Self::Error(_) | Self::Raw(_) => None,
        }
    }
}

/// A request as the mock received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Request op code.
    pub op: OpCode,
    /// The object the request addresses: a database, transaction,
    /// statement or blob handle. Zero when there is none.
    pub handle: i32,
    /// SQL text, or the database path for attach and create.
    pub text: Option<String>,
    /// Parameter block or info items sent with the request.
    pub block: Bytes,
    /// Decoded parameter values of an execute.
    pub params: Vec<SqlValue>,
    /// Free mode of `op_free_statement`, row count of `op_fetch`.
    pub arg: i32,
}

impl RecordedRequest {
    fn new(op: OpCode) -> Self {
        Self {
            op,
            handle: 0,
            text: None,
            block: Bytes::new(),
            params: Vec::new(),
            arg: 0,
        }
    }
}

/// Configuration for the mock Firebird server.
#[derive(Debug, Default)]
pub struct MockServerConfig {
    /// Responses keyed by exact SQL text.
    responses: HashMap<String, MockResponse>,
    /// Input parameter descriptors keyed by SQL text.
    params: HashMap<String, Vec<XSqlVar>>,
    /// Response for SQL with no scripted response.
    default_response: Option<MockResponse>,
    /// Answer `op_connect` with `op_reject`.
    reject: bool,
    /// Send an `op_dummy` ahead of every reply.
    keepalives: bool,
    /// Version string reported by database info.
    server_version: String,
    /// Page size reported by database info.
    page_size: i32,
    /// Largest blob segment served by `op_get_segment`.
    segment_size: usize,
    /// Blobs present when the server starts.
    blobs: Vec<(BlobId, Bytes)>,
}

impl MockServerConfig {
    fn response_for(&self, sql: &str) -> MockResponse {
        self.responses
            .get(sql)
            .or(self.default_response.as_ref())
            .cloned()
            .unwrap_or_else(MockResponse::empty)
    }
}

/// Builder for [`MockFirebirdServer`].
pub struct MockServerBuilder {
    config: MockServerConfig,
}

impl MockServerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: MockServerConfig {
                default_response: Some(MockResponse::empty()),
                server_version: "LI-V3.0.10.33601 Firebird 3.0".to_string(),
                page_size: 8192,
                segment_size: 16384,
                ..MockServerConfig::default()
            },
        }
    }

    /// Add a response for a specific SQL statement.
    pub fn with_response(mut self, sql: impl Into<String>, response: MockResponse) -> Self {
        self.config.responses.insert(sql.into(), response);
        self
    }

    /// Describe input parameters for a specific SQL statement.
    pub fn with_params(mut self, sql: impl Into<String>, params: Vec<XSqlVar>) -> Self {
        self.config.params.insert(sql.into(), params);
        self
    }

    /// Set the response for unscripted SQL.
    pub fn with_default_response(mut self, response: MockResponse) -> Self {
        self.config.default_response = Some(response);
        self
    }

    /// Reject every connection at the protocol handshake.
    pub fn reject_connections(mut self) -> Self {
        self.config.reject = true;
        self
    }

    /// Precede every reply with an `op_dummy` keep-alive.
    pub fn with_keepalives(mut self) -> Self {
        self.config.keepalives = true;
        self
    }

    /// Set the version string reported by database info.
    pub fn with_server_version(mut self, version: impl Into<String>) -> Self {
        self.config.server_version = version.into();
        self
    }

    /// Set the page size reported by database info.
    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Cap the size of blob segments served to readers.
    pub fn with_segment_size(mut self, size: usize) -> Self {
        self.config.segment_size = size.max(1);
        self
    }

    /// Store a blob before any client connects.
    pub fn with_blob(mut self, id: BlobId, data: impl Into<Bytes>) -> Self {
        self.config.blobs.push((id, data.into()));
        self
    }

    /// Build and start the mock server.
    pub async fn build(self) -> Result<MockFirebirdServer> {
        MockFirebirdServer::start(self.config).await
    }
}

impl Default for MockServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared by every connection.
#[derive(Debug, Default)]
struct Shared {
    requests: Mutex<Vec<RecordedRequest>>,
    blobs: Mutex<HashMap<BlobId, Bytes>>,
    next_blob: AtomicU32,
    connection_count: Mutex<usize>,
}

impl Shared {
    fn allocate_blob_id(&self) -> BlobId {
        let n = self.next_blob.fetch_add(1, Ordering::Relaxed);
        let mut id = [0u8; 8];
        id[0] = 0x80;
        id[4..].copy_from_slice(&n.to_be_bytes());
        BlobId(id)
    }
}

/// A mock Firebird server for testing.
///
/// Each accepted connection is served by its own task. Statements, open
/// blobs and handles are per connection; stored blobs and the request log
/// are shared.
pub struct MockFirebirdServer {
    /// Server address.
    addr: SocketAddr,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
    /// State shared with the connection tasks.
    shared: Arc<Shared>,
}

impl MockFirebirdServer {
    /// Create a new builder for the mock server.
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::new()
    }

    /// Start the mock server on an available port.
    pub async fn start(config: MockServerConfig) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, _) = broadcast::channel(1);

        let shared = Arc::new(Shared {
            next_blob: AtomicU32::new(0x1000),
            ..Shared::default()
        });
        shared
            .blobs
            .lock()
            .await
            .extend(config.blobs.iter().cloned());
        let config = Arc::new(config);

        let server = Self {
            addr,
            shutdown_tx: shutdown_tx.clone(),
            shared: shared.clone(),
        };

        // Spawn the accept loop
        let mut shutdown_rx = shutdown_tx.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _peer_addr)) => {
                                let config = config.clone();
                                let shared = shared.clone();
                                tokio::spawn(async move {
                                    *shared.connection_count.lock().await += 1;
                                    let conn = MockConnection::new(stream, config, shared.clone());
                                    if let Err(e) = conn.serve().await {
                                        tracing::debug!("Connection error: {}", e);
                                    }
                                    let mut count = shared.connection_count.lock().await;
                                    *count = count.saturating_sub(1);
                                });
                            }
                            Err(e) => {
                                tracing::error!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Ok(server)
    }

    /// Get the server's listening address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the host string for connection configuration.
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Client configuration pointing at this server.
    pub fn config(&self) -> Config {
        Config::new()
            .host(self.host())
            .port(self.port())
            .database(DB_PATH)
            .credentials("SYSDBA", "masterkey")
    }

    /// Get the current connection count.
    pub async fn connection_count(&self) -> usize {
        *self.shared.connection_count.lock().await
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().await.clone()
    }

    /// Received requests with the given op code.
    pub async fn requests_with(&self, op: OpCode) -> Vec<RecordedRequest> {
        self.shared
            .requests
            .lock()
            .await
            .iter()
            .filter(|r| r.op == op)
            .cloned()
            .collect()
    }

    /// Contents of a stored blob.
    pub async fn blob(&self, id: BlobId) -> Option<Bytes> {
        self.shared.blobs.lock().await.get(&id).cloned()
    }

    /// Stop the server.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

impl Drop for MockFirebirdServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A decoded client request, reduced to what the mock acts on.
#[derive(Debug)]
enum Incoming {
    Connect,
    Attach,
    Detach,
    Transaction,
    EndTransaction,
    AllocateStatement,
    Prepare {
        stmt: i32,
        sql: String,
        buffer_length: i32,
    },
    ExecImmediate {
        sql: String,
    },
    InfoSql {
        stmt: i32,
        items: Bytes,
        buffer_length: i32,
    },
    InfoDatabase {
        items: Bytes,
    },
    InfoTransaction {
        tr: i32,
        items: Bytes,
    },
    Execute {
        stmt: i32,
        singleton: bool,
    },
    Fetch {
        stmt: i32,
        count: i32,
    },
    FreeStatement {
        stmt: i32,
        mode: i32,
    },
    OpenBlob {
        id: BlobId,
    },
    CreateBlob,
    GetSegment {
        blob: i32,
        buffer_length: i32,
    },
    BatchSegments {
        blob: i32,
        segment: Bytes,
    },
    CloseBlob {
        blob: i32,
    },
}

/// Decode one request from `src`.
///
/// Returns [`ProtocolError::Incomplete`] until the whole request is
/// buffered.
fn decode_request(
    src: &mut impl Buf,
) -> std::result::Result<(Incoming, RecordedRequest), ProtocolError> {
    let op = OpCode::from_i32(get_i32(src)?)?;
    let mut record = RecordedRequest::new(op);

    let request = match op {
        OpCode::Connect => {
            let _attach_op = get_i32(src)?;
            let _connect_version = get_i32(src)?;
            let _architecture = get_i32(src)?;
            record.text = Some(text(get_bytes(src)?));
            let offers = get_i32(src)?;
            record.block = get_bytes(src)?;
            for _ in 0..offers.max(0) * 5 {
                get_i32(src)?;
            }
            Incoming::Connect
        }
        OpCode::Attach | OpCode::Create => {
            get_i32(src)?;
            record.text = Some(text(get_bytes(src)?));
            record.block = get_bytes(src)?;
            Incoming::Attach
        }
        OpCode::Detach | OpCode::DropDatabase => {
            record.handle = get_i32(src)?;
            Incoming::Detach
        }
        OpCode::Transaction => {
            record.handle = get_i32(src)?;
            record.block = get_bytes(src)?;
            Incoming::Transaction
        }
        OpCode::Commit | OpCode::CommitRetaining | OpCode::Rollback | OpCode::RollbackRetaining => {
            record.handle = get_i32(src)?;
            Incoming::EndTransaction
        }
        OpCode::AllocateStatement => {
            record.handle = get_i32(src)?;
            Incoming::AllocateStatement
        }
        OpCode::PrepareStatement => {
            let _tr = get_i32(src)?;
            let stmt = get_i32(src)?;
            let _dialect = get_i32(src)?;
            let sql = text(get_bytes(src)?);
            record.block = get_bytes(src)?;
            let buffer_length = get_i32(src)?;
            record.handle = stmt;
            record.text = Some(sql.clone());
            Incoming::Prepare {
                stmt,
                sql,
                buffer_length,
            }
        }
        OpCode::ExecImmediate => {
            record.handle = get_i32(src)?;
            let _db = get_i32(src)?;
            let _dialect = get_i32(src)?;
            let sql = text(get_bytes(src)?);
            get_bytes(src)?;
            get_i32(src)?;
            record.text = Some(sql.clone());
            Incoming::ExecImmediate { sql }
        }
        OpCode::InfoSql | OpCode::InfoDatabase | OpCode::InfoTransaction => {
            let handle = get_i32(src)?;
            get_i32(src)?;
            let items = get_bytes(src)?;
            let buffer_length = get_i32(src)?;
            record.handle = handle;
            record.block = items.clone();
            match op {
                OpCode::InfoSql => Incoming::InfoSql {
                    stmt: handle,
                    items,
                    buffer_length,
                },
                OpCode::InfoDatabase => Incoming::InfoDatabase { items },
                _ => Incoming::InfoTransaction { tr: handle, items },
            }
        }
        OpCode::Execute | OpCode::Execute2 => {
            let stmt = get_i32(src)?;
            let _tr = get_i32(src)?;
            let blr = get_bytes(src)?;
            let _message_number = get_i32(src)?;
            let messages = get_i32(src)?;
            if messages > 0 {
                let vars = blr_vars(&blr)?;
                let raw = decode_row(src, &vars)?;
                record.params = raw
                    .iter()
                    .zip(&vars)
                    .map(|(value, var)| param_value(value.as_ref(), var))
                    .collect();
            }
            let singleton = op == OpCode::Execute2;
            if singleton {
                get_bytes(src)?;
                get_i32(src)?;
            }
            record.handle = stmt;
            Incoming::Execute { stmt, singleton }
        }
        OpCode::Fetch => {
            let stmt = get_i32(src)?;
            get_bytes(src)?;
            get_i32(src)?;
            let count = get_i32(src)?;
            record.handle = stmt;
            record.arg = count;
            Incoming::Fetch { stmt, count }
        }
        OpCode::FreeStatement => {
            let stmt = get_i32(src)?;
            let mode = get_i32(src)?;
            record.handle = stmt;
            record.arg = mode;
            Incoming::FreeStatement { stmt, mode }
        }
        OpCode::OpenBlob => {
            record.handle = get_i32(src)?;
            Incoming::OpenBlob {
                id: BlobId(get_array::<8>(src)?),
            }
        }
        OpCode::CreateBlob2 => {
            record.block = get_bytes(src)?;
            record.handle = get_i32(src)?;
            get_array::<8>(src)?;
            Incoming::CreateBlob
        }
        OpCode::GetSegment => {
            let blob = get_i32(src)?;
            let buffer_length = get_i32(src)?;
            get_bytes(src)?;
            record.handle = blob;
            record.arg = buffer_length;
            Incoming::GetSegment {
                blob,
                buffer_length,
            }
        }
        OpCode::BatchSegments => {
            let blob = get_i32(src)?;
            get_i32(src)?;
            let segment = get_bytes(src)?;
            record.handle = blob;
            record.arg = segment.len() as i32;
            Incoming::BatchSegments { blob, segment }
        }
        OpCode::CloseBlob => {
            let blob = get_i32(src)?;
            record.handle = blob;
            Incoming::CloseBlob { blob }
        }
        other => return Err(ProtocolError::UnknownOpCode(other.as_i32())),
    };
    Ok((request, record))
}

fn text(bytes: Bytes) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Decode a parameter; text that is not UTF-8 arrives as binary.
fn param_value(raw: Option<&Bytes>, var: &XSqlVar) -> SqlValue {
    decode_nullable(raw, var).unwrap_or_else(|_| {
        raw.map_or(SqlValue::Null, |bytes| SqlValue::Binary(bytes.clone()))
    })
}

/// Recover message descriptors from a message BLR.
///
/// The BLR is already buffered in full, so running out of it is a
/// malformed message rather than a reason to wait for more input.
fn blr_vars(blr: &[u8]) -> std::result::Result<Vec<XSqlVar>, ProtocolError> {
    let src = &mut &blr[..];
    let header = take(src, 6)?;
    let groups = usize::from(u16::from_le_bytes([header[4], header[5]])) / 2;
    let mut vars = Vec::with_capacity(groups);
    for _ in 0..groups {
        let code = take(src, 1)?[0];
        let var = match code {
            37 | 14 => {
                let len = take(src, 2)?;
                let len = i32::from(u16::from_le_bytes([len[0], len[1]]));
                let sql_type = if code == 37 {
                    SqlType::Varying
                } else {
                    SqlType::Text
                };
                XSqlVar::new(sql_type, len)
            }
            7 | 8 | 16 => {
                let scale = i32::from(take(src, 1)?[0] as i8);
                let (sql_type, len) = match code {
                    7 => (SqlType::Short, 2),
                    8 => (SqlType::Long, 4),
                    _ => (SqlType::Int64, 8),
                };
                XSqlVar::new(sql_type, len).with_scale(scale)
            }
            9 => {
                take(src, 1)?;
                XSqlVar::new(SqlType::Blob, 8)
            }
            27 => XSqlVar::new(SqlType::Double, 8),
            11 => XSqlVar::new(SqlType::DFloat, 8),
            10 => XSqlVar::new(SqlType::Float, 4),
            12 => XSqlVar::new(SqlType::Date, 4),
            13 => XSqlVar::new(SqlType::Time, 4),
            35 => XSqlVar::new(SqlType::Timestamp, 8),
            23 => XSqlVar::new(SqlType::Boolean, 1),
            other => {
                return Err(ProtocolError::InvalidInfo(format!(
                    "unsupported BLR data type {other}"
                )));
            }
        };
        if take(src, 2)? != [7, 0] {
            return Err(malformed());
        }
        vars.push(var);
    }
    Ok(vars)
}

fn take<'a>(src: &mut &'a [u8], n: usize) -> std::result::Result<&'a [u8], ProtocolError> {
    let (head, rest) = src.split_at_checked(n).ok_or_else(malformed)?;
    *src = rest;
    Ok(head)
}

fn malformed() -> ProtocolError {
    ProtocolError::InvalidInfo("malformed message BLR".into())
}

/// A prepared statement on one connection.
#[derive(Debug)]
struct Prepared {
    response: MockResponse,
    params: Vec<XSqlVar>,
}

#[derive(Debug, Default)]
struct StatementSlot {
    prepared: Option<Prepared>,
    cursor: VecDeque<Vec<SqlValue>>,
    affected: u64,
}

#[derive(Debug)]
enum BlobSlot {
    Reading(Bytes),
    Writing { id: BlobId, data: BytesMut },
}

/// One client connection.
struct MockConnection {
    stream: TcpStream,
    buf: BytesMut,
    config: Arc<MockServerConfig>,
    shared: Arc<Shared>,
    connected: bool,
    closing: bool,
    next_handle: i32,
    statements: HashMap<i32, StatementSlot>,
    blobs: HashMap<i32, BlobSlot>,
}

impl MockConnection {
    fn new(stream: TcpStream, config: Arc<MockServerConfig>, shared: Arc<Shared>) -> Self {
        Self {
            stream,
            buf: BytesMut::with_capacity(4096),
            config,
            shared,
            connected: false,
            closing: false,
            next_handle: 100,
            statements: HashMap::new(),
            blobs: HashMap::new(),
        }
    }

    async fn serve(mut self) -> Result<()> {
        while let Some((request, record)) = self.read_request().await? {
            tracing::trace!(op = ?record.op, handle = record.handle, "mock request");
            self.shared.requests.lock().await.push(record);

            let reply = self.reply(request).await?;
            let mut out = BytesMut::with_capacity(reply.len() + 4);
            if self.config.keepalives {
                put_i32(&mut out, OpCode::Dummy.as_i32());
            }
            out.extend_from_slice(&reply);
            self.stream.write_all(&out).await?;

            if self.closing {
                break;
            }
        }
        Ok(())
    }

    async fn read_request(&mut self) -> Result<Option<(Incoming, RecordedRequest)>> {
        loop {
            if !self.buf.is_empty() {
                let mut src = &self.buf[..];
                match decode_request(&mut src) {
                    Ok(decoded) => {
                        let used = self.buf.len() - src.len();
                        self.buf.advance(used);
                        return Ok(Some(decoded));
                    }
                    Err(ProtocolError::Incomplete { .. }) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            if self.stream.read_buf(&mut self.buf).await? == 0 {
                if self.buf.is_empty() {
                    // Client disconnected
                    return Ok(None);
                }
                return Err(MockServerError::Protocol(
                    "connection closed mid-request".into(),
                ));
            }
        }
    }

    fn handle(&mut self) -> i32 {
        self.next_handle += 1;
        self.next_handle
    }

    async fn reply(&mut self, request: Incoming) -> Result<BytesMut> {
        if !self.connected && !matches!(request, Incoming::Connect) {
            return Err(MockServerError::Protocol(format!(
                "expected op_connect, got {request:?}"
            )));
        }

        let reply = match request {
            Incoming::Connect => {
                self.connected = true;
                let mut out = BytesMut::new();
                if self.config.reject {
                    self.closing = true;
                    put_i32(&mut out, OpCode::Reject.as_i32());
                } else {
                    put_i32(&mut out, OpCode::Accept.as_i32());
                    put_i32(&mut out, ProtocolVersion::V10.raw());
                    put_i32(&mut out, Architecture::Generic as i32);
                    put_i32(&mut out, PacketType::Rpc as i32);
                }
                out
            }
            Incoming::Attach => ok(DB_HANDLE),
            Incoming::Detach => {
                self.closing = true;
                ok(0)
            }
            Incoming::Transaction => {
                let tr = self.handle();
                ok(tr)
            }
            Incoming::EndTransaction => ok(0),
            Incoming::AllocateStatement => {
                let stmt = self.handle();
                self.statements.insert(stmt, StatementSlot::default());
                ok(stmt)
            }
            Incoming::Prepare {
                stmt,
                sql,
                buffer_length,
            } => self.prepare(stmt, &sql, buffer_length),
            Incoming::ExecImmediate { sql } => match self.config.response_for(&sql) {
                MockResponse::Error(status) => failure(&status),
                _ => ok(0),
            },
            Incoming::InfoSql {
                stmt,
                items,
                buffer_length,
            } => self.info_sql(stmt, &items, buffer_length),
            Incoming::InfoDatabase { items } => generic(0, [0; 8], &self.database_info(&items)),
            Incoming::InfoTransaction { tr, items } => {
                generic(0, [0; 8], &transaction_info(tr, &items))
            }
            Incoming::Execute { stmt, singleton } => self.execute(stmt, singleton)?,
            Incoming::Fetch { stmt, count } => self.fetch(stmt, count)?,
            Incoming::FreeStatement { stmt, mode } => {
                if mode == 2 {
                    self.statements.remove(&stmt);
                } else if let Some(slot) = self.statements.get_mut(&stmt) {
                    slot.cursor.clear();
                }
                ok(0)
            }
            Incoming::OpenBlob { id } => self.open_blob(id).await,
            Incoming::CreateBlob => {
                let id = self.shared.allocate_blob_id();
                let blob = self.handle();
                self.blobs.insert(
                    blob,
                    BlobSlot::Writing {
                        id,
                        data: BytesMut::new(),
                    },
                );
                generic(blob, id.0, &[])
            }
            Incoming::GetSegment {
                blob,
                buffer_length,
            } => self.get_segment(blob, buffer_length),
            Incoming::BatchSegments { blob, segment } => self.put_segments(blob, segment),
            Incoming::CloseBlob { blob } => {
                if let Some(BlobSlot::Writing { id, data }) = self.blobs.remove(&blob) {
                    self.shared.blobs.lock().await.insert(id, data.freeze());
                }
                ok(0)
            }
        };
        Ok(reply)
    }

    fn prepare(&mut self, stmt: i32, sql: &str, buffer_length: i32) -> BytesMut {
        let response = self.config.response_for(sql);
        let params = self.config.params.get(sql).cloned().unwrap_or_default();
        let Some(slot) = self.statements.get_mut(&stmt) else {
            return failure(&[StatusArg::Gds(GDS_BAD_STMT_HANDLE)]);
        };

        let Some((stmt_type, columns)) = response.shape() else {
            return match response {
                MockResponse::Raw(bytes) => BytesMut::from(&bytes[..]),
                MockResponse::Error(status) => failure(&status),
                _ => ok(0),
            };
        };

        let mut info = InfoWriter::new(buffer_length);
        let _ = info.int(SqlInfoItem::StmtType as u8, stmt_type as i32)
            && describe_section(&mut info, SqlInfoItem::Select, columns, 1)
            && describe_section(&mut info, SqlInfoItem::Bind, &params, 1);
        let data = info.finish();

        slot.prepared = Some(Prepared { response, params });
        slot.cursor.clear();
        generic(0, [0; 8], &data)
    }

    fn info_sql(&mut self, stmt: i32, items: &[u8], buffer_length: i32) -> BytesMut {
        let Some(Prepared { response, params }) =
            self.statements.get(&stmt).and_then(|s| s.prepared.as_ref())
        else {
            return failure(&[StatusArg::Gds(GDS_BAD_STMT_HANDLE)]);
        };

        let data = match items {
            [start, 2, lo, hi, section, ..] if *start == SqlInfoItem::SqldaStart as u8 => {
                let index = u16::from_le_bytes([*lo, *hi]);
                let (item, vars) = if *section == SqlInfoItem::Select as u8 {
                    let columns = response.shape().map_or(&[][..], |(_, c)| c);
                    (SqlInfoItem::Select, columns)
                } else {
                    (SqlInfoItem::Bind, &params[..])
                };
                let mut info = InfoWriter::new(buffer_length);
                describe_section(&mut info, item, vars, index);
                info.finish()
            }
            [item, ..] if *item == SqlInfoItem::Records as u8 => {
                let affected = self.statements.get(&stmt).map_or(0, |s| s.affected);
                let kind = match response {
                    MockResponse::Affected { stmt_type, .. } => match stmt_type {
                        StatementType::Insert => records::INSERTED,
                        StatementType::Update => records::UPDATED,
                        StatementType::Delete => records::DELETED,
                        _ => records::SELECTED,
                    },
                    _ => records::SELECTED,
                };
                record_counts(kind, affected)
            }
            _ => vec![INFO_END],
        };
        generic(0, [0; 8], &data)
    }

    fn execute(&mut self, stmt: i32, singleton: bool) -> Result<BytesMut> {
        let Some(slot) = self.statements.get_mut(&stmt) else {
            return Ok(failure(&[StatusArg::Gds(GDS_BAD_STMT_HANDLE)]));
        };
        let Some(prepared) = slot.prepared.as_ref() else {
            return Ok(failure(&[StatusArg::Gds(GDS_BAD_STMT_HANDLE)]));
        };

        if singleton {
            let (columns, row) = match &prepared.response {
                MockResponse::Singleton { columns, row } => (&columns[..], row.as_ref()),
                MockResponse::Rows { columns, rows } => (&columns[..], rows.first()),
                _ => (&[][..], None),
            };
            let mut out = BytesMut::new();
            put_i32(&mut out, OpCode::SqlResponse.as_i32());
            match row {
                Some(row) => {
                    put_i32(&mut out, 1);
                    put_raw(&mut out, &row_bytes(row, columns)?);
                }
                None => put_i32(&mut out, 0),
            }
            out.extend_from_slice(&ok(0));
            return Ok(out);
        }

        match &prepared.response {
            MockResponse::Rows { rows, .. } => slot.cursor = rows.iter().cloned().collect(),
            MockResponse::Affected { count, .. } => slot.affected = *count,
            _ => {}
        }
        Ok(ok(0))
    }

    fn fetch(&mut self, stmt: i32, count: i32) -> Result<BytesMut> {
        let Some(StatementSlot {
            prepared: Some(prepared),
            cursor,
            ..
        }) = self.statements.get_mut(&stmt)
        else {
            return Ok(failure(&[StatusArg::Gds(GDS_BAD_STMT_HANDLE)]));
        };
        let columns = prepared.response.shape().map_or(&[][..], |(_, c)| c);

        let mut out = BytesMut::new();
        for _ in 0..count.max(1) {
            let Some(row) = cursor.pop_front() else {
                break;
            };
            put_i32(&mut out, OpCode::FetchResponse.as_i32());
            put_i32(&mut out, 0);
            put_i32(&mut out, 1);
            put_raw(&mut out, &row_bytes(&row, columns)?);
        }

        let status = if cursor.is_empty() {
            FETCH_NO_MORE_ROWS
        } else {
            0
        };
        put_i32(&mut out, OpCode::FetchResponse.as_i32());
        put_i32(&mut out, status);
        put_i32(&mut out, 0);
        Ok(out)
    }

    async fn open_blob(&mut self, id: BlobId) -> BytesMut {
        let Some(data) = self.shared.blobs.lock().await.get(&id).cloned() else {
            return failure(&[StatusArg::Gds(GDS_BAD_BLOB_ID)]);
        };
        let blob = self.handle();
        self.blobs.insert(blob, BlobSlot::Reading(data));
        ok(blob)
    }

    fn get_segment(&mut self, blob: i32, buffer_length: i32) -> BytesMut {
        let Some(BlobSlot::Reading(remaining)) = self.blobs.get_mut(&blob) else {
            return failure(&[StatusArg::Gds(GDS_BAD_BLOB_HANDLE)]);
        };

        let limit = usize::try_from(buffer_length).unwrap_or(0);
        let mut data = BytesMut::new();
        while !remaining.is_empty() {
            let room = limit.saturating_sub(data.len() + 2);
            if room == 0 {
                break;
            }
            let len = remaining.len().min(self.config.segment_size).min(room);
            let segment = remaining.split_to(len);
            data.put_u16_le(len as u16);
            data.put_slice(&segment);
        }

        let handle = if remaining.is_empty() { SEGMENT_EOF } else { 0 };
        generic(handle, [0; 8], &data)
    }

    fn put_segments(&mut self, blob: i32, mut segments: Bytes) -> BytesMut {
        let Some(BlobSlot::Writing { data, .. }) = self.blobs.get_mut(&blob) else {
            return failure(&[StatusArg::Gds(GDS_BAD_BLOB_HANDLE)]);
        };
        while segments.remaining() >= 2 {
            let len = usize::from(segments.get_u16_le()).min(segments.remaining());
            data.put_slice(&segments.split_to(len));
        }
        ok(0)
    }

    fn database_info(&self, items: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        for &item in items.iter().take_while(|&&item| item != INFO_END) {
            match item {
                database::ISC_VERSION | database::FIREBIRD_VERSION => {
                    let version = self.config.server_version.as_bytes();
                    let version = &version[..version.len().min(255)];
                    let mut data = vec![1, version.len() as u8];
                    data.extend_from_slice(version);
                    cluster(&mut out, item, &data);
                }
                database::PAGE_SIZE => cluster(&mut out, item, &self.config.page_size.to_le_bytes()),
                database::SQL_DIALECT => cluster(&mut out, item, &3i32.to_le_bytes()),
                database::ODS_VERSION => cluster(&mut out, item, &12i32.to_le_bytes()),
                database::ODS_MINOR_VERSION | database::READ_ONLY => {
                    cluster(&mut out, item, &0i32.to_le_bytes());
                }
                _ => {}
            }
        }
        out.push(INFO_END);
        out
    }
}

fn transaction_info(tr: i32, items: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    if items.contains(&transaction::ID) {
        cluster(&mut out, transaction::ID, &tr.to_le_bytes());
    }
    out.push(INFO_END);
    out
}

fn record_counts(kind: u8, count: u64) -> Vec<u8> {
    let count = i32::try_from(count).unwrap_or(i32::MAX);
    let mut counts = Vec::new();
    for sub in [
        records::SELECTED,
        records::INSERTED,
        records::UPDATED,
        records::DELETED,
    ] {
        let value = if sub == kind { count } else { 0 };
        cluster(&mut counts, sub, &value.to_le_bytes());
    }
    counts.push(INFO_END);

    let mut out = Vec::new();
    cluster(&mut out, SqlInfoItem::Records as u8, &counts);
    out.push(INFO_END);
    out
}

fn cluster(out: &mut Vec<u8>, item: u8, data: &[u8]) {
    out.push(item);
    out.extend_from_slice(&(data.len() as u16).to_le_bytes());
    out.extend_from_slice(data);
}

fn row_bytes(row: &[SqlValue], columns: &[XSqlVar]) -> Result<Bytes> {
    encode_row(row, columns).map_err(|e| MockServerError::Protocol(format!("row encoding: {e}")))
}

/// Bounded info buffer: once an item no longer fits, it is replaced by
/// `isc_info_truncated` and everything after it is dropped.
struct InfoWriter {
    out: Vec<u8>,
    limit: usize,
    truncated: bool,
}

impl InfoWriter {
    fn new(buffer_length: i32) -> Self {
        Self {
            out: Vec::new(),
            limit: usize::try_from(buffer_length).unwrap_or(0),
            truncated: false,
        }
    }

    /// Append `bytes` if they fit, keeping one byte for the terminator.
    fn push(&mut self, bytes: &[u8]) -> bool {
        if self.truncated {
            return false;
        }
        if self.out.len() + bytes.len() + 1 > self.limit {
            self.out.push(INFO_TRUNCATED);
            self.truncated = true;
            return false;
        }
        self.out.extend_from_slice(bytes);
        true
    }

    fn int(&mut self, item: u8, value: i32) -> bool {
        let mut bytes = vec![item, 4, 0];
        bytes.extend_from_slice(&value.to_le_bytes());
        self.push(&bytes)
    }

    fn text(&mut self, item: u8, value: &str) -> bool {
        let mut bytes = Vec::with_capacity(value.len() + 3);
        cluster(&mut bytes, item, value.as_bytes());
        self.push(&bytes)
    }

    fn finish(mut self) -> Vec<u8> {
        if !self.truncated {
            self.out.push(INFO_END);
        }
        self.out
    }
}

/// Describe `vars` from the 1-based index `start`. Returns `false` once
/// the buffer is full.
fn describe_section(info: &mut InfoWriter, section: SqlInfoItem, vars: &[XSqlVar], start: u16) -> bool {
    let mut header = vec![section as u8, SqlInfoItem::DescribeVars as u8, 4, 0];
    header.extend_from_slice(&(vars.len() as i32).to_le_bytes());
    if !info.push(&header) {
        return false;
    }

    let skip = usize::from(start.max(1)) - 1;
    vars.iter()
        .enumerate()
        .skip(skip)
        .all(|(i, var)| describe_var(info, i + 1, var))
}

fn describe_var(info: &mut InfoWriter, seq: usize, var: &XSqlVar) -> bool {
    let code = var.sql_type.code() | i32::from(var.nullable);
    info.int(SqlInfoItem::SqldaSeq as u8, seq as i32)
        && info.int(SqlInfoItem::Type as u8, code)
        && info.int(SqlInfoItem::SubType as u8, var.sub_type)
        && info.int(SqlInfoItem::Scale as u8, var.scale)
        && info.int(SqlInfoItem::Length as u8, var.length)
        && info.int(SqlInfoItem::NullInd as u8, i32::from(var.nullable))
        && info.text(SqlInfoItem::Field as u8, &var.field)
        && info.text(SqlInfoItem::Relation as u8, &var.relation)
        && info.text(SqlInfoItem::Owner as u8, &var.owner)
        && info.text(SqlInfoItem::Alias as u8, &var.alias)
        && info.push(&[SqlInfoItem::DescribeEnd as u8])
}

/// Encode a generic `op_response`.
fn generic(handle: i32, object_id: [u8; 8], data: &[u8]) -> BytesMut {
    let mut out = BytesMut::with_capacity(24 + data.len());
    put_i32(&mut out, OpCode::Response.as_i32());
    put_i32(&mut out, handle);
    put_raw(&mut out, &object_id);
    put_bytes(&mut out, data);
    put_i32(&mut out, 0);
    out
}

fn ok(handle: i32) -> BytesMut {
    generic(handle, [0; 8], &[])
}

/// Encode an `op_response` carrying an error status vector.
fn failure(status: &[StatusArg]) -> BytesMut {
    let mut out = BytesMut::new();
    put_i32(&mut out, OpCode::Response.as_i32());
    put_i32(&mut out, 0);
    put_raw(&mut out, &[0; 8]);
    put_bytes(&mut out, &[]);
    for arg in status {
        match arg {
            StatusArg::Gds(code) => {
                put_i32(&mut out, 1);
                put_i32(&mut out, *code);
            }
            StatusArg::Number(n) => {
                put_i32(&mut out, 4);
                put_i32(&mut out, *n);
            }
            StatusArg::Text(text) => {
                put_i32(&mut out, 2);
                put_bytes(&mut out, text.as_bytes());
            }
            StatusArg::Warning(code) => {
                put_i32(&mut out, 18);
                put_i32(&mut out, *code);
            }
            StatusArg::SqlState(state) => {
                put_i32(&mut out, 19);
                put_bytes(&mut out, state.as_bytes());
            }
        }
    }
    put_i32(&mut out, 0);
    out
}
