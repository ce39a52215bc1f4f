use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(enlace_referrals_migration::Migrator).await;
}
