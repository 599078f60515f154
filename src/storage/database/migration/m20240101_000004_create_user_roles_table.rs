use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoles::UserUuid).uuid().not_null())
                    .col(ColumnDef::new(UserRoles::RoleUuid).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserRoles::UserUuid)
                            .col(UserRoles::RoleUuid),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_user_uuid")
                            .from(UserRoles::Table, UserRoles::UserUuid)
                            .to(Users::Table, Users::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_role_uuid")
                            .from(UserRoles::Table, UserRoles::RoleUuid)
                            .to(Roles::Table, Roles::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_roles_role_uuid")
                    .table(UserRoles::Table)
                    .col(UserRoles::RoleUuid)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserRoles {
    Table,
    UserUuid,
    RoleUuid,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Uuid,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Uuid,
}
