//! Credential database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::AppError;
use domain::{Credential, Email, Password};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credentials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// The stored hash is trusted as-is; the stored email still goes through
/// validation so a corrupted row can never become a `Credential`.
impl TryFrom<Model> for Credential {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let email = Email::parse(&model.email).map_err(|_| {
            AppError::storage(format!("credential {} holds an invalid email", model.id))
        })?;

        Ok(Credential::restore(
            model.id,
            email,
            Password::from_hash(model.password_hash),
            model.created_at,
        ))
    }
}
