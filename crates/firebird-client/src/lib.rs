//! # firebird-client
//!
//! Async Firebird client speaking the native wire protocol (version 10)
//! over TCP.
//!
//! This is the primary public API surface of the workspace. It layers a
//! small, typed interface over a strictly sequential protocol session.
//!
//! ## Features
//!
//! - **Async/await**: Built on Tokio; every round trip is awaited
//! - **Prepared statements**: Prepare once, execute with typed parameters
//! - **Transactions**: Isolation levels, lock resolution, retaining commits
//! - **Streaming results**: Rows are fetched in batches as the cursor advances
//! - **Blobs**: Segment-wise reads and writes, optional automatic loading
//!
//! ## Layers
//!
//! ```text
//! Client     typed parameters, rows, affected-row counts
//!   Session  one request, one response; poisoned on desync
//!     Connection (firebird-codec)  framed reads and writes
//!       Request / Response (firebird-protocol)  wire format
//! ```
//!
//! ## Session State
//!
//! ```text
//! Disconnected -> Handshaking -> Connected -> Attached -> Closed
//!                                     any -> Poisoned
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use firebird_client::{Client, Config, TransactionOptions, IsolationLevel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_dsn("SYSDBA:masterkey@localhost:3050/employee")?;
//!     let mut client = Client::connect(config).await?;
//!
//!     let tr = client
//!         .begin_transaction(TransactionOptions::new().isolation(IsolationLevel::Snapshot))
//!         .await?;
//!
//!     let result = client
//!         .execute(&tr, "UPDATE users SET active = ? WHERE id = ?", &[&true, &42])
//!         .await?;
//!     println!("updated {} rows", result.rows_affected);
//!
//!     let rows = client
//!         .query(&tr, "SELECT id, name FROM users", &[])
//!         .await?
//!         .collect_all()
//!         .await?;
//!     for row in &rows {
//!         let name: String = row.get_by_name("name")?;
//!         println!("{name}");
//!     }
//!
//!     client.commit(tr).await?;
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod blob;
pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod row;
pub mod session;
pub mod state;
pub mod statement;
pub mod stream;
pub mod transaction;

// Re-export commonly used types
pub use blob::BlobReader;
pub use client::Client;
pub use config::{Config, TimeoutConfig};
pub use error::{Error, Result};
pub use firebird_codec::CloseHandle;
pub use firebird_protocol::{BlobId, MessageCatalog, StatementType};
pub use firebird_types::{FromSql, SqlValue, ToSql};
pub use messages::MESSAGES;
pub use row::{Column, Row};
pub use session::{FetchBatch, Session};
pub use state::SessionState;
pub use statement::Statement;
pub use stream::{ExecuteResult, RowCursor};
pub use transaction::{IsolationLevel, Transaction, TransactionOptions};
