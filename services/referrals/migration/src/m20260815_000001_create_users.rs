use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::IdentityId).uuid())
                    .col(
                        ColumnDef::new(Users::Identification)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).text().not_null())
                    .col(ColumnDef::new(Users::LastName).text().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .text()
                            .not_null()
                            .default("volunteer"),
                    )
                    .col(
                        ColumnDef::new(Users::ReferralCode)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::ParentUserId).uuid())
                    .col(ColumnDef::new(Users::Email).text())
                    .col(ColumnDef::new(Users::Phone).text())
                    .col(ColumnDef::new(Users::Department).text())
                    .col(ColumnDef::new(Users::Municipality).text())
                    .col(ColumnDef::new(Users::Zone).text())
                    .col(ColumnDef::new(Users::Neighborhood).text())
                    .col(ColumnDef::new(Users::BirthDate).date())
                    .col(ColumnDef::new(Users::Occupation).text())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::ParentUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    IdentityId,
    Identification,
    FirstName,
    LastName,
    Role,
    ReferralCode,
    ParentUserId,
    Email,
    Phone,
    Department,
    Municipality,
    Zone,
    Neighborhood,
    BirthDate,
    Occupation,
    CreatedAt,
    UpdatedAt,
}
