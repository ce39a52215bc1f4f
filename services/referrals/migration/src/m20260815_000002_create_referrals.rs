use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Referrals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Referrals::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Referrals::Identification)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Referrals::FirstName).text().not_null())
                    .col(ColumnDef::new(Referrals::LastName).text().not_null())
                    .col(ColumnDef::new(Referrals::Gender).text())
                    .col(ColumnDef::new(Referrals::BirthDate).date())
                    .col(ColumnDef::new(Referrals::Phone).text())
                    .col(ColumnDef::new(Referrals::Email).text())
                    .col(ColumnDef::new(Referrals::Department).text())
                    .col(ColumnDef::new(Referrals::Municipality).text().not_null())
                    .col(ColumnDef::new(Referrals::Zone).text())
                    .col(ColumnDef::new(Referrals::Neighborhood).text())
                    .col(ColumnDef::new(Referrals::Occupation).text())
                    .col(
                        ColumnDef::new(Referrals::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Referrals::ReferredBy).uuid().not_null())
                    .col(ColumnDef::new(Referrals::UserId).uuid())
                    .col(
                        ColumnDef::new(Referrals::TermsAccepted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Referrals::PrivacyAccepted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Referrals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Referrals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Referrals::Table, Referrals::ReferredBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Referrals::Table, Referrals::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Referrals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Referrals {
    Table,
    Id,
    Identification,
    FirstName,
    LastName,
    Gender,
    BirthDate,
    Phone,
    Email,
    Department,
    Municipality,
    Zone,
    Neighborhood,
    Occupation,
    Status,
    ReferredBy,
    UserId,
    TermsAccepted,
    PrivacyAccepted,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
