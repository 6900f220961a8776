use crate::db;
use crate::forms::{Favorite, Intent};
use crate::models::User;
use crate::services::{ServiceError, StoreError};
use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn product_exists(&self, product_id: Uuid) -> Result<bool, StoreError>;
    /// `false` when the product already was a favorite.
    async fn add(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, StoreError>;
    /// `false` when the product was not a favorite.
    async fn remove(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
impl FavoriteStore for PgPool {
    async fn product_exists(&self, product_id: Uuid) -> Result<bool, StoreError> {
        Ok(db::product::exists(self, product_id).await?)
    }

    async fn add(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, StoreError> {
        Ok(db::favorite::add(self, user_id, product_id).await?)
    }

    async fn remove(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, StoreError> {
        Ok(db::favorite::remove(self, user_id, product_id).await?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteState {
    pub product_id: Uuid,
    pub favorite: bool,
    /// whether the call actually changed anything
    pub changed: bool,
}

/// Idempotent: adding twice keeps one link, removing a missing link succeeds.
pub async fn toggle<S>(store: &S, user: &User, command: Favorite) -> Result<FavoriteState, ServiceError>
where
    S: FavoriteStore + ?Sized,
{
    if !store.product_exists(command.product_id).await? {
        return Err(ServiceError::NotFound(format!(
            "Product {} not found",
            command.product_id
        )));
    }

    let (favorite, changed) = match command.intent {
        Intent::Add => (true, store.add(user.id, command.product_id).await?),
        Intent::Remove => (false, store.remove(user.id, command.product_id).await?),
    };

    tracing::info!(
        user_id = %user.id,
        product_id = %command.product_id,
        intent = ?command.intent,
        changed,
        "Favorites updated"
    );

    Ok(FavoriteState {
        product_id: command.product_id,
        favorite,
        changed,
    })
}
