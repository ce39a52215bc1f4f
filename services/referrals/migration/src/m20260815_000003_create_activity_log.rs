use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLog::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLog::UserId).uuid().not_null())
                    .col(ColumnDef::new(ActivityLog::Action).text().not_null())
                    .col(ColumnDef::new(ActivityLog::EntityType).text().not_null())
                    .col(ColumnDef::new(ActivityLog::EntityId).uuid())
                    .col(ColumnDef::new(ActivityLog::Description).text())
                    .col(ColumnDef::new(ActivityLog::Metadata).json_binary())
                    .col(
                        ColumnDef::new(ActivityLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ActivityLog::Table, ActivityLog::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ActivityLog {
    Table,
    Id,
    UserId,
    Action,
    EntityType,
    EntityId,
    Description,
    Metadata,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
