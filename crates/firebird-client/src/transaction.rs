//! Transaction support.
//!
//! Transactions are started with a transaction parameter block (TPB) built
//! from [`TransactionOptions`]. Several transactions may be open on one
//! session at a time.

use bytes::Bytes;
use firebird_protocol::ParamBlock;
use firebird_protocol::param_block::tpb;

/// Transaction isolation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsolationLevel {
    /// Read committed, reading the latest committed record version.
    #[default]
    ReadCommitted,

    /// Read committed, waiting for uncommitted versions to resolve.
    ReadCommittedNoRecordVersion,

    /// Snapshot (`concurrency`): a stable view from transaction start.
    Snapshot,

    /// Snapshot with table stability (`consistency`): tables read are
    /// protected from concurrent writers.
    SnapshotTableStability,
}

impl IsolationLevel {
    /// Get the isolation level name as used in Firebird SQL.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReadCommitted => "READ COMMITTED RECORD_VERSION",
            Self::ReadCommittedNoRecordVersion => "READ COMMITTED NO RECORD_VERSION",
            Self::Snapshot => "SNAPSHOT",
            Self::SnapshotTableStability => "SNAPSHOT TABLE STABILITY",
        }
    }

    fn push(self, block: ParamBlock) -> ParamBlock {
        match self {
            Self::ReadCommitted => block.flag(tpb::READ_COMMITTED).flag(tpb::REC_VERSION),
            Self::ReadCommittedNoRecordVersion => {
                block.flag(tpb::READ_COMMITTED).flag(tpb::NO_REC_VERSION)
            }
            Self::Snapshot => block.flag(tpb::CONCURRENCY),
            Self::SnapshotTableStability => block.flag(tpb::CONSISTENCY),
        }
    }
}

/// Options used to start a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionOptions {
    /// Isolation level.
    pub isolation: IsolationLevel,
    /// Whether to wait on lock conflicts instead of failing immediately.
    pub wait: bool,
    /// Whether the transaction is read-only.
    pub read_only: bool,
    /// Whether every statement commits automatically.
    pub autocommit: bool,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            isolation: IsolationLevel::default(),
            wait: true,
            read_only: false,
            autocommit: false,
        }
    }
}

impl TransactionOptions {
    /// Create options with defaults: read committed, read-write, wait.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the isolation level.
    #[must_use]
    pub fn isolation(mut self, isolation: IsolationLevel) -> Self {
        self.isolation = isolation;
        self
    }

    /// Fail immediately on lock conflicts.
    #[must_use]
    pub fn no_wait(mut self) -> Self {
        self.wait = false;
        self
    }

    /// Make the transaction read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Commit automatically after each statement.
    #[must_use]
    pub fn autocommit(mut self) -> Self {
        self.autocommit = true;
        self
    }

    /// Build the transaction parameter block.
    #[must_use]
    pub fn tpb(&self) -> Bytes {
        let block = ParamBlock::new(tpb::VERSION3).flag(if self.read_only {
            tpb::READ
        } else {
            tpb::WRITE
        });
        let block = block.flag(if self.wait { tpb::WAIT } else { tpb::NOWAIT });
        let block = self.isolation.push(block);
        let block = if self.autocommit {
            block.flag(tpb::AUTOCOMMIT)
        } else {
            block
        };
        block.build()
    }
}

/// An open transaction.
///
/// Ending a transaction consumes it; the retaining variants keep it open.
#[derive(Debug, PartialEq, Eq)]
pub struct Transaction {
    handle: i32,
    options: TransactionOptions,
}

impl Transaction {
    pub(crate) fn new(handle: i32, options: TransactionOptions) -> Self {
        Self { handle, options }
    }

    /// The server-side transaction handle.
    #[must_use]
    pub fn handle(&self) -> i32 {
        self.handle
    }

    /// The options the transaction was started with.
    #[must_use]
    pub fn options(&self) -> &TransactionOptions {
        &self.options
    }

    /// Get the isolation level.
    #[must_use]
    pub fn isolation_level(&self) -> IsolationLevel {
        self.options.isolation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tpb() {
        let tpb = TransactionOptions::default().tpb();
        assert_eq!(&tpb[..], &[3, 9, 6, 15, 17]);
    }

    #[test]
    fn test_snapshot_read_only_no_wait() {
        let tpb = TransactionOptions::new()
            .isolation(IsolationLevel::Snapshot)
            .read_only()
            .no_wait()
            .tpb();
        assert_eq!(&tpb[..], &[3, 8, 7, 2]);
    }

    #[test]
    fn test_table_stability_autocommit() {
        let tpb = TransactionOptions::new()
            .isolation(IsolationLevel::SnapshotTableStability)
            .autocommit()
            .tpb();
        assert_eq!(&tpb[..], &[3, 9, 6, 1, 16]);
    }

    #[test]
    fn test_isolation_names() {
        assert_eq!(IsolationLevel::default().name(), "READ COMMITTED RECORD_VERSION");
        assert_eq!(IsolationLevel::Snapshot.name(), "SNAPSHOT");
    }
}
