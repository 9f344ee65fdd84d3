use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the application's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS summarist;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO summarist, public;")
            .await?;

        // gen_random_uuid() lives in pgcrypto on Postgres versions before 13
        manager
            .get_connection()
            .execute_unprepared("CREATE EXTENSION IF NOT EXISTS pgcrypto;")
            .await?;

        // Grant the base DB user that will execute all application queries
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE summarist TO summarist;
                    GRANT ALL ON SCHEMA summarist TO summarist;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA summarist GRANT ALL ON TABLES TO summarist;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA summarist GRANT ALL ON SEQUENCES TO summarist;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA summarist GRANT ALL ON FUNCTIONS TO summarist;
                END $$;
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Revoke default privileges first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA summarist REVOKE ALL ON FUNCTIONS FROM summarist;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA summarist REVOKE ALL ON SEQUENCES FROM summarist;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA summarist REVOKE ALL ON TABLES FROM summarist;
                    REVOKE ALL ON SCHEMA summarist FROM summarist;
                    REVOKE ALL PRIVILEGES ON DATABASE summarist FROM summarist;
                END $$;
            "#,
            )
            .await?;

        // Drop the schema (CASCADE will remove all objects in it)
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS summarist CASCADE;")
            .await?;

        Ok(())
    }
}
