//! Basic usage: connect, query, update, commit.
//!
//! ```text
//! FIREBIRD_DSN=SYSDBA:masterkey@localhost/employee cargo run --example basic
//! ```

use firebird_client::{Client, Config, IsolationLevel, TransactionOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "firebird_client=debug".into()),
        )
        .init();

    let dsn = std::env::var("FIREBIRD_DSN")
        .unwrap_or_else(|_| "SYSDBA:masterkey@localhost/employee".into());
    let config = Config::from_dsn(&dsn)?;
    let mut client = Client::connect(config).await?;

    println!("server: {}", client.server_version().await?);

    let tr = client
        .begin_transaction(TransactionOptions::new().isolation(IsolationLevel::Snapshot))
        .await?;

    let mut rows = client
        .query(
            &tr,
            "SELECT rdb$relation_name FROM rdb$relations WHERE rdb$system_flag = ?",
            &[&1i32],
        )
        .await?;
    while let Some(row) = rows.next().await? {
        let name: String = row.get(0)?;
        println!("{}", name.trim_end());
    }
    drop(rows);

    client.commit(tr).await?;
    client.close().await?;
    Ok(())
}
