use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RolePermissions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RolePermissions::RoleUuid).uuid().not_null())
                    .col(
                        ColumnDef::new(RolePermissions::PermissionUuid)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RolePermissions::RoleUuid)
                            .col(RolePermissions::PermissionUuid),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_permissions_role_uuid")
                            .from(RolePermissions::Table, RolePermissions::RoleUuid)
                            .to(Roles::Table, Roles::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_permissions_permission_uuid")
                            .from(RolePermissions::Table, RolePermissions::PermissionUuid)
                            .to(Permissions::Table, Permissions::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_role_permissions_permission_uuid")
                    .table(RolePermissions::Table)
                    .col(RolePermissions::PermissionUuid)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RolePermissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RolePermissions {
    Table,
    RoleUuid,
    PermissionUuid,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Uuid,
}

#[derive(DeriveIden)]
enum Permissions {
    Table,
    Uuid,
}
