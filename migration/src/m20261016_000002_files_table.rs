//! 文件表迁移
//!
//! 文件内容与元数据存放在同一行，上传时一次事务写入。

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(StoredFile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StoredFile::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StoredFile::StoredName).string_len(300).not_null())
                    .col(ColumnDef::new(StoredFile::OriginalName).string_len(255).not_null())
                    .col(content_column(backend))
                    .col(ColumnDef::new(StoredFile::ContentType).string_len(255).not_null())
                    .col(ColumnDef::new(StoredFile::Size).big_integer().not_null())
                    .col(
                        ColumnDef::new(StoredFile::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 列表按上传时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_files_uploaded_at")
                    .table(StoredFile::Table)
                    .col(StoredFile::UploadedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_files_uploaded_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StoredFile::Table).to_owned())
            .await
    }
}

/// 内容列：MySQL 的 BLOB 只有 64 KiB，需要 LONGBLOB
fn content_column(backend: DatabaseBackend) -> ColumnDef {
    let mut column = ColumnDef::new(StoredFile::Content);
    if backend == DatabaseBackend::MySql {
        column.custom(Alias::new("longblob"));
    } else {
        column.blob();
    }
    column.not_null().to_owned()
}

#[derive(DeriveIden)]
enum StoredFile {
    #[sea_orm(iden = "files")]
    Table,
    Id,
    StoredName,
    OriginalName,
    Content,
    ContentType,
    Size,
    UploadedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files_table_sql<T: SchemaBuilder>(backend: DatabaseBackend, builder: T) -> String {
        Table::create()
            .table(StoredFile::Table)
            .col(content_column(backend))
            .to_owned()
            .to_string(builder)
            .to_lowercase()
    }

    #[test]
    fn test_mysql_content_holds_large_files() {
        let sql = files_table_sql(DatabaseBackend::MySql, MysqlQueryBuilder);
        assert!(sql.contains("longblob"), "{}", sql);
    }

    #[test]
    fn test_other_backends_use_native_blob() {
        let pg = files_table_sql(DatabaseBackend::Postgres, PostgresQueryBuilder);
        assert!(pg.contains("bytea"), "{}", pg);

        let sqlite = files_table_sql(DatabaseBackend::Sqlite, SqliteQueryBuilder);
        assert!(sqlite.contains("blob"), "{}", sqlite);
        assert!(!sqlite.contains("longblob"));
    }
}
