use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User-to-role assignment row
///
/// Composite primary key keeps a `(user, role)` pair unique. Rows survive a
/// user soft delete so historical assignments stay queryable.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    /// User UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_uuid: Uuid,

    /// Role UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub role_uuid: Uuid,
}

/// Assignment relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserUuid",
        to = "super::user::Column::Uuid"
    )]
    User,

    /// Assigned role
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleUuid",
        to = "super::role::Column::Uuid"
    )]
    Role,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
