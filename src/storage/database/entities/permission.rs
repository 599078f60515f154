use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Permission database model
///
/// `(name, guard)` is unique; the index lives in the migration.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    /// Permission UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,

    /// Permission name
    pub name: String,

    /// Guard namespace
    pub guard: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Permission entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Role assignment rows
    #[sea_orm(has_many = "super::role_permission::Entity")]
    RolePermissions,
}

impl Related<super::role_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePermissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain permission model
    pub fn to_domain_permission(&self) -> crate::core::models::Permission {
        crate::core::models::Permission {
            uuid: self.uuid,
            name: self.name.clone(),
            guard: self.guard.clone(),
            created_at: self.created_at.with_timezone(&Utc),
            updated_at: self.updated_at.with_timezone(&Utc),
        }
    }

    /// Convert domain permission model to SeaORM active model
    pub fn from_domain_permission(permission: &crate::core::models::Permission) -> ActiveModel {
        ActiveModel {
            uuid: Set(permission.uuid),
            name: Set(permission.name.clone()),
            guard: Set(permission.guard.clone()),
            created_at: Set(permission.created_at.into()),
            updated_at: Set(permission.updated_at.into()),
        }
    }
}
