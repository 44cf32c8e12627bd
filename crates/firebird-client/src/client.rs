//! Firebird client.
//!
//! [`Client`] is a thin layer over [`Session`]: it turns configuration into
//! attach parameters, binds typed parameters, decodes rows and reports
//! affected-row counts. Every operation maps onto session requests.

use bytes::Bytes;
use firebird_protocol::info::{self, database, transaction};
use firebird_protocol::response::RawRow;
use firebird_protocol::{AttachParams, BlobId, FreeMode, SqlType};
use firebird_types::{EncodedMessage, SqlValue, ToSql, encode_params};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::session::Session;
use crate::state::SessionState;
use crate::statement::Statement;
use crate::stream::{ExecuteResult, RowCursor, load_blobs};
use crate::transaction::{Transaction, TransactionOptions};

/// A Firebird client attached to one database.
///
/// # Example
///
/// ```rust,ignore
/// use firebird_client::{Client, Config};
///
/// let config = Config::from_dsn("SYSDBA:masterkey@localhost/employee")?;
/// let mut client = Client::connect(config).await?;
///
/// let tr = client.begin().await?;
/// let mut rows = client.query(&tr, "SELECT id FROM users WHERE name = ?", &[&"alice"]).await?;
/// while let Some(row) = rows.next().await? {
///     let id: i32 = row.get(0)?;
/// }
/// client.commit(tr).await?;
/// client.close().await?;
/// ```
pub struct Client<T = TcpStream>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    session: Session<T>,
    config: Config,
}

impl Client<TcpStream> {
    /// Connect to the server and attach to the configured database.
    pub async fn connect(config: Config) -> Result<Self> {
        let mut session = Session::connect(&config).await?;
        session
            .attach(&config.database, &attach_params(&config))
            .await?;
        Ok(Self { session, config })
    }

    /// Connect to the server and create the configured database.
    pub async fn create_database(config: Config) -> Result<Self> {
        let mut session = Session::connect(&config).await?;
        session
            .create_database(&config.database, &attach_params(&config), config.page_size)
            .await?;
        Ok(Self { session, config })
    }
}

impl<T> Client<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Handshake and attach over an already-connected transport.
    pub async fn from_stream(transport: T, config: Config) -> Result<Self> {
        let mut session = Session::from_stream(
            transport,
            std::sync::Arc::clone(&config.catalog),
            config.info_buffer_length,
        );
        session.handshake(&config.database).await?;
        session
            .attach(&config.database, &attach_params(&config))
            .await?;
        Ok(Self { session, config })
    }

    /// The configuration this client was created with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// The underlying session, for requests the client does not wrap.
    pub fn session(&mut self) -> &mut Session<T> {
        &mut self.session
    }

    /// Get a handle that can close the connection from another task.
    #[must_use]
    pub fn close_handle(&self) -> firebird_codec::CloseHandle<T> {
        self.session.close_handle()
    }

    // ---- transactions ----

    /// Start a transaction with the given options.
    pub async fn begin_transaction(&mut self, options: TransactionOptions) -> Result<Transaction> {
        let handle = self.session.begin_transaction(&options.tpb()).await?;
        tracing::debug!(
            handle,
            isolation = options.isolation.name(),
            "transaction started"
        );
        Ok(Transaction::new(handle, options))
    }

    /// Start a read-committed, read-write, waiting transaction.
    pub async fn begin(&mut self) -> Result<Transaction> {
        self.begin_transaction(TransactionOptions::default()).await
    }

    /// Commit and end a transaction.
    pub async fn commit(&mut self, tr: Transaction) -> Result<()> {
        self.session.commit(tr.handle()).await
    }

    /// Roll back and end a transaction.
    pub async fn rollback(&mut self, tr: Transaction) -> Result<()> {
        self.session.rollback(tr.handle()).await
    }

    /// Commit the work done so far, keeping the transaction open.
    pub async fn commit_retaining(&mut self, tr: &Transaction) -> Result<()> {
        self.session.commit_retaining(tr.handle()).await
    }

    /// Undo the work done so far, keeping the transaction open.
    pub async fn rollback_retaining(&mut self, tr: &Transaction) -> Result<()> {
        self.session.rollback_retaining(tr.handle()).await
    }

    // ---- statements ----

    /// Allocate and prepare a statement.
    pub async fn prepare(&mut self, tr: &Transaction, sql: &str) -> Result<Statement> {
        let handle = self.session.allocate_statement().await?;
        let prepared = match self.session.prepare(tr.handle(), handle, sql).await {
            Ok(info) => Statement::from_info(handle, sql, info),
            Err(e) => Err(e),
        };
        if prepared.is_err() && self.session.state().is_usable() {
            self.session.defer_free(handle, FreeMode::Drop);
        }
        prepared
    }

    /// Release a prepared statement.
    pub async fn free(&mut self, statement: Statement) -> Result<()> {
        self.session
            .free_statement(statement.handle(), FreeMode::Drop)
            .await
    }

    /// Execute SQL that returns no rows; reports affected rows for DML.
    pub async fn execute(
        &mut self,
        tr: &Transaction,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<ExecuteResult> {
        let statement = self.prepare(tr, sql).await?;
        let result = self.execute_prepared(tr, &statement, params).await;
        match (result, self.free(statement).await) {
            (Err(e), _) | (Ok(_), Err(e)) => Err(e),
            (Ok(result), Ok(())) => Ok(result),
        }
    }

    /// Execute a prepared statement, discarding any rows.
    pub async fn execute_prepared(
        &mut self,
        tr: &Transaction,
        statement: &Statement,
        params: &[&dyn ToSql],
    ) -> Result<ExecuteResult> {
        let message = self.bind(tr, statement, params).await?;
        let stmt = statement.handle();

        if statement.is_singleton() {
            self.session
                .execute2(
                    stmt,
                    tr.handle(),
                    message.as_ref(),
                    statement.output_blr(),
                    std::sync::Arc::clone(statement.outputs()),
                )
                .await?;
            return Ok(ExecuteResult::default());
        }

        self.session
            .execute(stmt, tr.handle(), message.as_ref())
            .await?;
        if statement.has_cursor() {
            self.session.free_statement(stmt, FreeMode::Close).await?;
            return Ok(ExecuteResult::default());
        }

        let stmt_type = statement.statement_type();
        if !stmt_type.is_dml() {
            return Ok(ExecuteResult::default());
        }
        let counts = self.session.records(stmt).await?;
        Ok(ExecuteResult::new(counts.for_statement(stmt_type)))
    }

    /// Run a query and stream its rows. The statement is released when the
    /// cursor finishes or is dropped.
    pub async fn query(
        &mut self,
        tr: &Transaction,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<RowCursor<'_, T>> {
        let statement = self.prepare(tr, sql).await?;
        self.run(tr, statement, params, FreeMode::Drop).await
    }

    /// Execute a prepared statement and stream its rows. The statement
    /// stays prepared.
    pub async fn query_prepared(
        &mut self,
        tr: &Transaction,
        statement: &Statement,
        params: &[&dyn ToSql],
    ) -> Result<RowCursor<'_, T>> {
        self.run(tr, statement.clone(), params, FreeMode::Close)
            .await
    }

    /// Execute a procedure-like statement and return its single result
    /// row.
    pub async fn execute_procedure(
        &mut self,
        tr: &Transaction,
        statement: &Statement,
        params: &[&dyn ToSql],
    ) -> Result<Option<Row>> {
        let message = self.bind(tr, statement, params).await?;
        let raw = self
            .session
            .execute2(
                statement.handle(),
                tr.handle(),
                message.as_ref(),
                statement.output_blr(),
                std::sync::Arc::clone(statement.outputs()),
            )
            .await?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let mut row = Row::decode(
            &raw,
            statement.outputs(),
            std::sync::Arc::clone(statement.columns()),
        )?;
        if self.config.auto_load_blobs {
            load_blobs(&mut self.session, tr.handle(), &mut row).await?;
        }
        Ok(Some(row))
    }

    /// Execute SQL without parameters or results, such as DDL, without
    /// preparing it.
    pub async fn execute_immediate(&mut self, tr: &Transaction, sql: &str) -> Result<()> {
        self.session.exec_immediate(tr.handle(), sql).await
    }

    /// Execute `statement` and wrap whatever it returns in a cursor.
    ///
    /// `release` is what the cursor sends when it is done: `Close` keeps a
    /// caller's prepared statement, `Drop` frees a one-off one.
    async fn run(
        &mut self,
        tr: &Transaction,
        statement: Statement,
        params: &[&dyn ToSql],
        release: FreeMode,
    ) -> Result<RowCursor<'_, T>> {
        let row = match self.launch(tr, &statement, params).await {
            Ok(row) => row,
            Err(e) => {
                if release == FreeMode::Drop && self.session.state().is_usable() {
                    self.session.defer_free(statement.handle(), FreeMode::Drop);
                }
                return Err(e);
            }
        };

        let fetch_size = self.config.fetch_size;
        let auto_load_blobs = self.config.auto_load_blobs;
        if statement.has_cursor() {
            return Ok(RowCursor::open(
                &mut self.session,
                statement,
                tr.handle(),
                fetch_size,
                auto_load_blobs,
                release,
            ));
        }

        // No server cursor: only a one-off statement needs releasing.
        let ad_hoc = (release == FreeMode::Drop).then_some(FreeMode::Drop);
        Ok(RowCursor::singleton(
            &mut self.session,
            statement,
            tr.handle(),
            row,
            auto_load_blobs,
            ad_hoc,
        ))
    }

    /// Bind parameters and execute; singleton statements return their row.
    async fn launch(
        &mut self,
        tr: &Transaction,
        statement: &Statement,
        params: &[&dyn ToSql],
    ) -> Result<Option<RawRow>> {
        let message = self.bind(tr, statement, params).await?;
        if statement.is_singleton() {
            return self
                .session
                .execute2(
                    statement.handle(),
                    tr.handle(),
                    message.as_ref(),
                    statement.output_blr(),
                    std::sync::Arc::clone(statement.outputs()),
                )
                .await;
        }
        self.session
            .execute(statement.handle(), tr.handle(), message.as_ref())
            .await?;
        Ok(None)
    }

    /// Convert parameters to a message, storing blob-bound values first.
    async fn bind(
        &mut self,
        tr: &Transaction,
        statement: &Statement,
        params: &[&dyn ToSql],
    ) -> Result<Option<EncodedMessage>> {
        let expected = statement.params().len();
        if params.len() != expected {
            return Err(Error::ParameterCount {
                expected,
                actual: params.len(),
            });
        }
        if params.is_empty() {
            return Ok(None);
        }

        let mut values = params
            .iter()
            .map(|p| p.to_sql())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for (value, var) in values.iter_mut().zip(statement.params().iter()) {
            if var.sql_type != SqlType::Blob {
                continue;
            }
            let data = match value {
                SqlValue::String(s) => Bytes::copy_from_slice(s.as_bytes()),
                SqlValue::Binary(b) => b.clone(),
                _ => continue,
            };
            let id = self.session.write_blob(tr.handle(), &data).await?;
            *value = SqlValue::Blob(id);
        }

        Ok(Some(encode_params(&values)?))
    }

    // ---- blobs ----

    /// Read a whole blob.
    pub async fn read_blob(&mut self, tr: &Transaction, id: BlobId) -> Result<Bytes> {
        self.session.read_blob(tr.handle(), id).await
    }

    /// Store `data` as a new blob and return its id.
    pub async fn write_blob(&mut self, tr: &Transaction, data: &[u8]) -> Result<BlobId> {
        self.session.write_blob(tr.handle(), data).await
    }

    // ---- info ----

    /// Request database information items.
    pub async fn database_info(&mut self, items: &[u8]) -> Result<Vec<(u8, Bytes)>> {
        self.session.info_database(items).await
    }

    /// The server version string.
    pub async fn server_version(&mut self) -> Result<String> {
        let data = self.database_item(database::ISC_VERSION).await?;
        let versions = info::info_strings(&data)?;
        versions
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidState("server reported no version".into()))
    }

    /// Database page size in bytes.
    pub async fn page_size(&mut self) -> Result<i64> {
        let data = self.database_item(database::PAGE_SIZE).await?;
        Ok(info::info_integer(&data))
    }

    /// SQL dialect of the database.
    pub async fn sql_dialect(&mut self) -> Result<i64> {
        let data = self.database_item(database::SQL_DIALECT).await?;
        Ok(info::info_integer(&data))
    }

    /// Server-side id of a transaction.
    pub async fn transaction_id(&mut self, tr: &Transaction) -> Result<i64> {
        let items = [transaction::ID, info::INFO_END];
        let clusters = self.session.info_transaction(tr.handle(), &items).await?;
        find_item(clusters, transaction::ID).map(|data| info::info_integer(&data))
    }

    async fn database_item(&mut self, item: u8) -> Result<Bytes> {
        let clusters = self.session.info_database(&[item, info::INFO_END]).await?;
        find_item(clusters, item)
    }

    // ---- teardown ----

    /// Detach from the database and close the connection.
    pub async fn close(mut self) -> Result<()> {
        if self.session.state().is_attached() {
            self.session.detach().await
        } else {
            self.session.close().await
        }
    }

    /// Drop the database and close the connection.
    pub async fn drop_database(mut self) -> Result<()> {
        self.session.drop_database().await
    }
}

impl<T> std::fmt::Debug for Client<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("session", &self.session)
            .field("config", &self.config)
            .finish()
    }
}

fn attach_params(config: &Config) -> AttachParams<'_> {
    AttachParams {
        user: &config.user,
        password: &config.password,
        charset: &config.charset,
        role: config.role.as_deref(),
    }
}

fn find_item(clusters: Vec<(u8, Bytes)>, item: u8) -> Result<Bytes> {
    clusters
        .into_iter()
        .find_map(|(code, data)| (code == item).then_some(data))
        .ok_or_else(|| Error::InvalidState(format!("server did not return info item {item}")))
}
