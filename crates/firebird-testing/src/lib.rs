//! # firebird-testing
//!
//! Test infrastructure for the Firebird client.
//!
//! This crate provides:
//! - Mock Firebird server for unit tests
//! - Testcontainers integration for integration tests
//! - Column and table fixtures
//!
//! ## Mock Server
//!
//! The mock server speaks the real wire protocol over TCP, so tests run the
//! whole client stack without a database:
//!
//! ```rust,ignore
//! use firebird_client::Client;
//! use firebird_testing::fixtures::int_column;
//! use firebird_testing::mock_server::{MockFirebirdServer, MockResponse};
//!
//! #[tokio::test]
//! async fn test_query() {
//!     let server = MockFirebirdServer::builder()
//!         .with_response("SELECT 1 FROM rdb$database", MockResponse::scalar(int_column("ONE"), 1))
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let mut client = Client::connect(server.config()).await.unwrap();
//!     let tr = client.begin().await.unwrap();
//!     let rows = client
//!         .query(&tr, "SELECT 1 FROM rdb$database", &[])
//!         .await
//!         .unwrap()
//!         .collect_all()
//!         .await
//!         .unwrap();
//!     assert_eq!(rows[0].get::<i32>(0).unwrap(), 1);
//! }
//! ```
//!
//! ## Container
//!
//! ```rust,ignore
//! use firebird_testing::container::FirebirdContainer;
//! use testcontainers::runners::AsyncRunner;
//!
//! let container = FirebirdContainer::new().start().await?;
//! let port = container.get_host_port_ipv4(3050).await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod container;
pub mod fixtures;
pub mod mock_server;

pub use container::FirebirdContainer;
pub use fixtures::TestFixture;
pub use mock_server::{MockFirebirdServer, MockResponse, MockServerBuilder, RecordedRequest};
