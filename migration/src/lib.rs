pub use sea_orm_migration::prelude::*;

mod m20240601_000001_v1_create_users;
mod m20240601_000002_v1_create_accounts;

pub use m20240601_000001_v1_create_users::User;
pub use m20240601_000002_v1_create_accounts::Account;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_v1_create_users::Migration),
            Box::new(m20240601_000002_v1_create_accounts::Migration),
        ]
    }
}
