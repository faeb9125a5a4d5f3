pub use sea_orm_migration::prelude::*;

mod m20260301_000001_app_user;
mod m20260301_000002_model_access;
mod m20260301_000003_data_model;
mod m20260301_000004_data_field;
mod m20260301_000005_data_record;
mod m20260301_000006_attachment;
mod m20260301_000007_template;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_app_user::Migration),
            Box::new(m20260301_000002_model_access::Migration),
            Box::new(m20260301_000003_data_model::Migration),
            Box::new(m20260301_000004_data_field::Migration),
            Box::new(m20260301_000005_data_record::Migration),
            Box::new(m20260301_000006_attachment::Migration),
            Box::new(m20260301_000007_template::Migration),
        ]
    }
}
