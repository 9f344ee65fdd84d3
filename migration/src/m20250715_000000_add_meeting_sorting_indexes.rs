use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create indexes for meetings table
        manager
            .create_index(
                Index::create()
                    .name("meetings_user_id")
                    .table((Alias::new("summarist"), Alias::new("meetings")))
                    .col(Alias::new("user_id"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("meetings_title")
                    .table((Alias::new("summarist"), Alias::new("meetings")))
                    .col(Alias::new("title"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("meetings_created_at")
                    .table((Alias::new("summarist"), Alias::new("meetings")))
                    .col(Alias::new("created_at"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("meetings_updated_at")
                    .table((Alias::new("summarist"), Alias::new("meetings")))
                    .col(Alias::new("updated_at"))
                    .to_owned(),
            )
            .await?;

        // Create indexes for action_items table
        manager
            .create_index(
                Index::create()
                    .name("action_items_meeting_id")
                    .table((Alias::new("summarist"), Alias::new("action_items")))
                    .col(Alias::new("meeting_id"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes for action_items table
        manager
            .drop_index(
                Index::drop()
                    .name("action_items_meeting_id")
                    .table((Alias::new("summarist"), Alias::new("action_items")))
                    .to_owned(),
            )
            .await?;

        // Drop indexes for meetings table
        manager
            .drop_index(
                Index::drop()
                    .name("meetings_updated_at")
                    .table((Alias::new("summarist"), Alias::new("meetings")))
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("meetings_created_at")
                    .table((Alias::new("summarist"), Alias::new("meetings")))
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("meetings_title")
                    .table((Alias::new("summarist"), Alias::new("meetings")))
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("meetings_user_id")
                    .table((Alias::new("summarist"), Alias::new("meetings")))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
