use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role-to-permission assignment row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "role_permissions")]
pub struct Model {
    /// Role UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub role_uuid: Uuid,

    /// Permission UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub permission_uuid: Uuid,
}

/// Assignment relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning role
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleUuid",
        to = "super::role::Column::Uuid"
    )]
    Role,

    /// Granted permission
    #[sea_orm(
        belongs_to = "super::permission::Entity",
        from = "Column::PermissionUuid",
        to = "super::permission::Column::Uuid"
    )]
    Permission,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
