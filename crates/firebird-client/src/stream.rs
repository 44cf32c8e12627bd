//! Streaming query results.
//!
//! A [`RowCursor`] pulls rows from an open server cursor in batches of the
//! configured fetch size. It borrows the session mutably, so no other
//! request can interleave with the fetches.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cursor = client.query(&tr, "SELECT id, name FROM users", &[]).await?;
//! while let Some(row) = cursor.next().await? {
//!     let id: i32 = row.get(0)?;
//! }
//! ```

use std::collections::VecDeque;

use bytes::Bytes;
use firebird_protocol::response::RawRow;
use firebird_protocol::types::BLOB_SUBTYPE_TEXT;
use firebird_protocol::FreeMode;
use firebird_types::SqlValue;
use futures_core::Stream;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{Error, Result};
use crate::row::{Column, Row};
use crate::session::Session;
use crate::statement::Statement;

/// A cursor over the rows of an executed statement.
///
/// Reaching the end closes the server cursor (or drops the statement, for
/// a one-off query). A cursor dropped before that queues the release; it is
/// sent ahead of the session's next request.
pub struct RowCursor<'a, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    session: &'a mut Session<T>,
    statement: Statement,
    tr: i32,
    fetch_size: i32,
    auto_load_blobs: bool,
    buffer: VecDeque<RawRow>,
    exhausted: bool,
    /// What to send once the rows are done; `None` once sent.
    release: Option<FreeMode>,
}

impl<'a, T> RowCursor<'a, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Cursor over a statement whose execution opened a server cursor.
    ///
    /// `release` is [`FreeMode::Close`] for a statement the caller keeps,
    /// [`FreeMode::Drop`] for one prepared just for this query.
    pub(crate) fn open(
        session: &'a mut Session<T>,
        statement: Statement,
        tr: i32,
        fetch_size: i32,
        auto_load_blobs: bool,
        release: FreeMode,
    ) -> Self {
        Self {
            session,
            statement,
            tr,
            fetch_size,
            auto_load_blobs,
            buffer: VecDeque::new(),
            exhausted: false,
            release: Some(release),
        }
    }

    /// Cursor over the at most one row returned by `op_execute2`. No
    /// server cursor is open; `release` drops an ad-hoc statement.
    pub(crate) fn singleton(
        session: &'a mut Session<T>,
        statement: Statement,
        tr: i32,
        row: Option<RawRow>,
        auto_load_blobs: bool,
        release: Option<FreeMode>,
    ) -> Self {
        Self {
            session,
            statement,
            tr,
            fetch_size: 1,
            auto_load_blobs,
            buffer: row.into_iter().collect(),
            exhausted: true,
            release,
        }
    }

    /// Column metadata for the result set.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.statement.columns()
    }

    /// Check if every row has been returned.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.exhausted && self.buffer.is_empty()
    }

    /// Get the next row, or `None` once the cursor is exhausted.
    pub async fn next(&mut self) -> Result<Option<Row>> {
        if self.buffer.is_empty() && !self.exhausted {
            let batch = self
                .session
                .fetch(
                    self.statement.handle(),
                    self.statement.output_blr(),
                    std::sync::Arc::clone(self.statement.outputs()),
                    self.fetch_size,
                )
                .await?;
            self.exhausted = batch.exhausted;
            self.buffer.extend(batch.rows);
        }

        let Some(raw) = self.buffer.pop_front() else {
            self.release().await?;
            return Ok(None);
        };

        let mut row = Row::decode(
            &raw,
            self.statement.outputs(),
            std::sync::Arc::clone(self.statement.columns()),
        )?;
        if self.auto_load_blobs {
            load_blobs(&mut *self.session, self.tr, &mut row).await?;
        }
        Ok(Some(row))
    }

    /// Collect every remaining row.
    pub async fn collect_all(mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Close the server cursor now, discarding unread rows.
    pub async fn close(mut self) -> Result<()> {
        self.buffer.clear();
        self.exhausted = true;
        self.release().await
    }

    /// Turn the cursor into a [`Stream`] of rows. The stream ends after
    /// the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Row>> + 'a
    where
        T: 'a,
    {
        futures_util::stream::unfold(Some(self), |cursor| async move {
            let mut cursor = cursor?;
            match cursor.next().await {
                Ok(Some(row)) => Some((Ok(row), Some(cursor))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    async fn release(&mut self) -> Result<()> {
        if let Some(mode) = self.release.take() {
            self.session
                .free_statement(self.statement.handle(), mode)
                .await?;
        }
        Ok(())
    }
}

impl<T> Drop for RowCursor<'_, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    fn drop(&mut self) {
        if let Some(mode) = self.release.take() {
            tracing::trace!(
                statement = self.statement.handle(),
                ?mode,
                "cursor dropped before the end, deferring release"
            );
            self.session.defer_free(self.statement.handle(), mode);
        }
    }
}

impl<T> std::fmt::Debug for RowCursor<'_, T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowCursor")
            .field("statement", &self.statement.handle())
            .field("buffered", &self.buffer.len())
            .field("exhausted", &self.exhausted)
            .field("release", &self.release)
            .finish_non_exhaustive()
    }
}

/// Replace blob ids in `row` with blob contents: text blobs become
/// strings, all others binary.
pub(crate) async fn load_blobs<T>(session: &mut Session<T>, tr: i32, row: &mut Row) -> Result<()>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let text_columns: Vec<bool> = row
        .columns()
        .iter()
        .map(|c| c.is_blob() && c.sub_type == BLOB_SUBTYPE_TEXT)
        .collect();

    for (index, value) in row.values_mut().iter_mut().enumerate() {
        let SqlValue::Blob(id) = *value else {
            continue;
        };
        let data = session.read_blob(tr, id).await?;
        *value = if text_columns.get(index).copied().unwrap_or(false) {
            blob_text(data)?
        } else {
            SqlValue::Binary(data)
        };
    }
    Ok(())
}

fn blob_text(data: Bytes) -> Result<SqlValue> {
    String::from_utf8(data.to_vec())
        .map(SqlValue::String)
        .map_err(|e| Error::Type(firebird_types::TypeError::InvalidEncoding(e.to_string())))
}

/// Result of a statement that does not return rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ExecuteResult {
    /// Rows inserted, updated or deleted, as reported by the server.
    pub rows_affected: u64,
}

impl ExecuteResult {
    /// Create a result with the given affected row count.
    #[must_use]
    pub fn new(rows_affected: u64) -> Self {
        Self { rows_affected }
    }
}
