//! Migration CLI for the catalog schema
//!
//! `DATABASE_URL=... cargo run -p migration -- up` (also `down`, `status`, `fresh`).

use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
