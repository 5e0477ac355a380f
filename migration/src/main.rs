use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(simple_banking_migration::Migrator).await;
}
