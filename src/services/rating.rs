use crate::db;
use crate::forms;
use crate::models::{self, RatingSummary, RatingTarget, Role};
use crate::middleware::authorization::DenyReason;
use crate::services::{ServiceError, StoreError};
use crate::views;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateOutcome {
    Created,
    Updated,
    Deleted,
    Unchanged,
}

#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn target_exists(&self, target: RatingTarget) -> Result<bool, StoreError>;
    /// Returns `true` when a new row was inserted, `false` when the existing vote changed.
    async fn upsert(&self, user_id: Uuid, target: RatingTarget, value: i16) -> Result<bool, StoreError>;
    async fn remove(&self, user_id: Uuid, target: RatingTarget) -> Result<bool, StoreError>;
    async fn summary(&self, target: RatingTarget) -> Result<RatingSummary, StoreError>;
    async fn fetch(&self, id: Uuid) -> Result<Option<models::Rating>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
impl RatingStore for PgPool {
    async fn target_exists(&self, target: RatingTarget) -> Result<bool, StoreError> {
        let exists = match target {
            RatingTarget::Product(id) => db::product::exists(self, id).await?,
            RatingTarget::Place(id) => db::place::exists(self, id).await?,
        };
        Ok(exists)
    }

    async fn upsert(&self, user_id: Uuid, target: RatingTarget, value: i16) -> Result<bool, StoreError> {
        let upserted = db::rating::upsert(self, user_id, target, value).await?;
        Ok(upserted.inserted)
    }

    async fn remove(&self, user_id: Uuid, target: RatingTarget) -> Result<bool, StoreError> {
        Ok(db::rating::delete_by_user_and_target(self, user_id, target).await?)
    }

    async fn summary(&self, target: RatingTarget) -> Result<RatingSummary, StoreError> {
        Ok(db::rating::summary(self, target).await?)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<models::Rating>, StoreError> {
        Ok(db::rating::fetch(self, id).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(db::rating::delete(self, id).await?)
    }
}

/// Applies a vote of `user`:
///
/// * `0` with an existing vote removes it, without one it is a no-op;
/// * `1..=5` inserts the vote or overwrites the previous value.
pub async fn rate<S>(
    store: &S,
    user: &models::User,
    command: forms::Rate,
) -> Result<views::rating::RateResult, ServiceError>
where
    S: RatingStore + ?Sized,
{
    let target = command.target;
    if !store.target_exists(target).await? {
        let message = match target {
            RatingTarget::Product(id) => format!("Product {} not found", id),
            RatingTarget::Place(id) => format!("Place {} not found", id),
        };
        return Err(ServiceError::NotFound(message));
    }

    let outcome = if command.rating == 0 {
        match store.remove(user.id, target).await? {
            true => RateOutcome::Deleted,
            false => RateOutcome::Unchanged,
        }
    } else {
        match store.upsert(user.id, target, command.rating).await? {
            true => RateOutcome::Created,
            false => RateOutcome::Updated,
        }
    };

    tracing::info!(
        user_id = %user.id,
        target = ?target,
        rating = command.rating,
        outcome = ?outcome,
        "Vote applied"
    );

    let summary = store.summary(target).await?;
    Ok(views::rating::RateResult {
        outcome,
        target,
        rating: (command.rating > 0).then_some(command.rating),
        summary,
    })
}

/// Owners remove their own votes, admins remove any vote.
pub async fn delete<S>(store: &S, user: &models::User, id: Uuid) -> Result<models::Rating, ServiceError>
where
    S: RatingStore + ?Sized,
{
    let rating = store
        .fetch(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Rating {} not found", id)))?;

    if rating.user_id != user.id && user.role != Role::Admin {
        return Err(DenyReason::NotOwner.into());
    }

    store.delete(id).await?;
    Ok(rating)
}
