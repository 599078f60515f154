use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Username (unique)
    #[sea_orm(unique)]
    pub username: String,

    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// Phone number (optional)
    pub phone: Option<String>,

    /// Password hash
    pub password_hash: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Role assignment rows
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Conversion methods between SeaORM model and our domain model
impl Model {
    /// Convert SeaORM model to domain user model
    pub fn to_domain_user(&self, role_uuids: Vec<Uuid>) -> crate::core::models::User {
        crate::core::models::User {
            uuid: self.uuid,
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password_hash: self.password_hash.clone(),
            role_uuids,
            created_at: self.created_at.with_timezone(&Utc),
            updated_at: self.updated_at.with_timezone(&Utc),
            deleted_at: self.deleted_at.map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Convert domain user model to SeaORM active model
    pub fn from_domain_user(user: &crate::core::models::User) -> ActiveModel {
        ActiveModel {
            uuid: Set(user.uuid),
            name: Set(user.name.clone()),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
            deleted_at: Set(user.deleted_at.map(|dt| dt.into())),
        }
    }
}
