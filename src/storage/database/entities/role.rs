use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role database model
///
/// `(name, guard)` is unique; the index lives in the migration.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    /// Role UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,

    /// Role name
    pub name: String,

    /// Guard namespace
    pub guard: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Role entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// User assignment rows
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,

    /// Permission assignment rows
    #[sea_orm(has_many = "super::role_permission::Entity")]
    RolePermissions,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl Related<super::role_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePermissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain role model
    pub fn to_domain_role(&self) -> crate::core::models::Role {
        crate::core::models::Role {
            uuid: self.uuid,
            name: self.name.clone(),
            guard: self.guard.clone(),
            created_at: self.created_at.with_timezone(&Utc),
            updated_at: self.updated_at.with_timezone(&Utc),
        }
    }

    /// Convert domain role model to SeaORM active model
    pub fn from_domain_role(role: &crate::core::models::Role) -> ActiveModel {
        ActiveModel {
            uuid: Set(role.uuid),
            name: Set(role.name.clone()),
            guard: Set(role.guard.clone()),
            created_at: Set(role.created_at.into()),
            updated_at: Set(role.updated_at.into()),
        }
    }
}
