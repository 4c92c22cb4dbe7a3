use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activity::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activity::Action).string_len(64).not_null())
                    .col(ColumnDef::new(Activity::EntityType).string_len(32).null())
                    .col(ColumnDef::new(Activity::EntityId).big_integer().null())
                    .col(ColumnDef::new(Activity::Details).text().null())
                    .col(
                        ColumnDef::new(Activity::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Activity {
    #[sea_orm(iden = "activity")]
    Table,
    Id,
    Action,
    EntityType,
    EntityId,
    Details,
    RecordedAt,
}
