use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Referrals::Table)
                    .col(Referrals::ReferredBy)
                    .col(Referrals::CreatedAt)
                    .name("idx_referrals_referred_by_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Referrals::Table)
                    .col(Referrals::UserId)
                    .name("idx_referrals_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ActivityLog::Table)
                    .col(ActivityLog::UserId)
                    .col(ActivityLog::CreatedAt)
                    .name("idx_activity_log_user_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_activity_log_user_id_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_referrals_user_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_referrals_referred_by_created_at")
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Referrals {
    Table,
    ReferredBy,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum ActivityLog {
    Table,
    UserId,
    CreatedAt,
}
