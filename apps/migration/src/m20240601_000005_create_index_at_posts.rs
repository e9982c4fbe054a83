use sea_orm_migration::prelude::*;

use crate::m20240601_000003_create_posts_table::Posts;
use crate::m20240601_000004_create_comments_table::Comments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Posts::Table)
                    .name("idx_posts_pub_date")
                    .col(Posts::PubDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Comments::Table)
                    .name("idx_comments_post_id")
                    .col(Comments::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(Comments::Table)
                    .name("idx_comments_post_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(Posts::Table)
                    .name("idx_posts_pub_date")
                    .to_owned(),
            )
            .await
    }
}
