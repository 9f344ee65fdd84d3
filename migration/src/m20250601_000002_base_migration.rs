use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TYPE summarist.subscription_tier AS ENUM ('free', 'pro', 'enterprise');
                CREATE TYPE summarist.priority AS ENUM ('low', 'medium', 'high');
                CREATE TYPE summarist.action_item_status AS ENUM ('pending', 'completed');

                CREATE TABLE summarist.users (
                    id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                    email varchar(255) NOT NULL UNIQUE,
                    name varchar(255),
                    password varchar(255) NOT NULL,
                    subscription_tier summarist.subscription_tier NOT NULL DEFAULT 'free',
                    created_at timestamptz NOT NULL DEFAULT now(),
                    updated_at timestamptz NOT NULL DEFAULT now()
                );

                CREATE TABLE summarist.meetings (
                    id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                    user_id uuid NOT NULL REFERENCES summarist.users (id) ON DELETE CASCADE,
                    title varchar(255) NOT NULL,
                    audio_url varchar(2048),
                    transcript text,
                    summary text,
                    duration_seconds integer,
                    created_at timestamptz NOT NULL DEFAULT now(),
                    updated_at timestamptz NOT NULL DEFAULT now()
                );

                CREATE TABLE summarist.action_items (
                    id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                    meeting_id uuid NOT NULL REFERENCES summarist.meetings (id) ON DELETE CASCADE,
                    description text NOT NULL,
                    assignee varchar(255),
                    priority summarist.priority NOT NULL DEFAULT 'medium',
                    status summarist.action_item_status NOT NULL DEFAULT 'pending',
                    due_date date,
                    created_at timestamptz NOT NULL DEFAULT now(),
                    updated_at timestamptz NOT NULL DEFAULT now()
                );

                CREATE TABLE summarist.usage_records (
                    id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                    user_id uuid NOT NULL REFERENCES summarist.users (id) ON DELETE CASCADE,
                    month varchar(7) NOT NULL,
                    summaries_count integer NOT NULL DEFAULT 0,
                    audio_minutes integer NOT NULL DEFAULT 0,
                    created_at timestamptz NOT NULL DEFAULT now(),
                    updated_at timestamptz NOT NULL DEFAULT now(),
                    UNIQUE (user_id, month)
                );
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TABLE IF EXISTS summarist.usage_records;
                DROP TABLE IF EXISTS summarist.action_items;
                DROP TABLE IF EXISTS summarist.meetings;
                DROP TABLE IF EXISTS summarist.users;

                DROP TYPE IF EXISTS summarist.action_item_status;
                DROP TYPE IF EXISTS summarist.priority;
                DROP TYPE IF EXISTS summarist.subscription_tier;
            "#,
            )
            .await?;

        Ok(())
    }
}
