use crate::db;
use crate::forms::{FormRejection, NewComment};
use crate::helpers::{FileStorage, Namespace};
use crate::middleware::authorization::DenyReason;
use crate::models::{Comment, User};
use crate::services::{ServiceError, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn product_exists(&self, product_id: Uuid) -> Result<bool, StoreError>;
    async fn fetch_comment(&self, id: Uuid) -> Result<Option<Comment>, StoreError>;
    async fn insert_comment(&self, comment: Comment) -> Result<Comment, StoreError>;
    async fn delete_comment(&self, id: Uuid) -> Result<bool, StoreError>;
    /// `None` when the comment is gone or no longer holds `expected_len` keys.
    async fn append_media(
        &self,
        id: Uuid,
        expected_len: usize,
        key: &str,
    ) -> Result<Option<Comment>, StoreError>;
    async fn remove_media(&self, id: Uuid, key: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl CommentStore for PgPool {
    async fn product_exists(&self, product_id: Uuid) -> Result<bool, StoreError> {
        Ok(db::product::exists(self, product_id).await?)
    }

    async fn fetch_comment(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        Ok(db::comment::fetch(self, id).await?)
    }

    async fn insert_comment(&self, comment: Comment) -> Result<Comment, StoreError> {
        Ok(db::comment::insert(self, comment).await?)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(db::comment::delete(self, id).await?)
    }

    async fn append_media(
        &self,
        id: Uuid,
        expected_len: usize,
        key: &str,
    ) -> Result<Option<Comment>, StoreError> {
        let expected_len = i32::try_from(expected_len)
            .map_err(|_| StoreError::Database("media list too long".to_string()))?;
        Ok(db::comment::append_media(self, id, expected_len, key).await?)
    }

    async fn remove_media(&self, id: Uuid, key: &str) -> Result<(), StoreError> {
        Ok(db::comment::remove_media(self, id, key).await?)
    }
}

pub const MAX_MEDIA: usize = 10;

/// Storage key of the `index`-th media file of a comment.
pub fn media_key(comment_id: Uuid, index: usize, extension: &str) -> String {
    format!("{}_{}.{}", comment_id, index, extension)
}

pub async fn add<S>(store: &S, user: &User, command: NewComment) -> Result<Comment, ServiceError>
where
    S: CommentStore + ?Sized,
{
    if !store.product_exists(command.product_id).await? {
        return Err(ServiceError::NotFound(format!(
            "Product {} not found",
            command.product_id
        )));
    }

    let comment = Comment {
        id: Uuid::new_v4(),
        user_id: user.id,
        product_id: command.product_id,
        text: command.text,
        media: vec![],
        created_at: Utc::now(),
    };

    Ok(store.insert_comment(comment).await?)
}

async fn fetch_own<S>(store: &S, user: &User, id: Uuid) -> Result<Comment, ServiceError>
where
    S: CommentStore + ?Sized,
{
    let comment = store
        .fetch_comment(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Comment {} not found", id)))?;

    if comment.user_id != user.id {
        return Err(DenyReason::NotOwner.into());
    }
    Ok(comment)
}

/// Stores an uploaded file and appends its key to the author's comment.
/// The slot is claimed in the store first; the file follows.
pub async fn attach_media<S>(
    store: &S,
    storage: &FileStorage,
    user: &User,
    id: Uuid,
    extension: &str,
    bytes: &[u8],
) -> Result<Comment, ServiceError>
where
    S: CommentStore + ?Sized,
{
    let comment = fetch_own(store, user, id).await?;
    let index = comment.media.len();
    if index >= MAX_MEDIA {
        return Err(FormRejection::form(format!(
            "A comment holds at most {} media files",
            MAX_MEDIA
        ))
        .into());
    }

    let key = media_key(id, index, extension);
    let comment = store
        .append_media(id, index, &key)
        .await?
        .ok_or_else(|| FormRejection::form("The comment changed meanwhile, try again"))?;

    if let Err(err) = storage.put(Namespace::Media, &key, bytes).await {
        if let Err(err) = store.remove_media(id, &key).await {
            tracing::error!("Failed to release media slot {}: {}", key, err);
        }
        return Err(StoreError::from(err).into());
    }

    tracing::info!(comment_id = %id, key = %key, "Comment media stored");
    Ok(comment)
}

/// Comments are removed by their author only, admins included. Their media
/// files go with them.
pub async fn delete<S>(
    store: &S,
    storage: &FileStorage,
    user: &User,
    id: Uuid,
) -> Result<Comment, ServiceError>
where
    S: CommentStore + ?Sized,
{
    let comment = fetch_own(store, user, id).await?;

    store.delete_comment(id).await?;
    tracing::info!(comment_id = %id, user_id = %user.id, "Comment deleted");

    for key in &comment.media {
        if let Err(err) = storage.remove(Namespace::Media, key).await {
            tracing::error!("Failed to remove {}/{}: {}", Namespace::Media, key, err);
        }
    }
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::mock::InMemoryStore;

    fn storage() -> (tempfile::TempDir, FileStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        (dir, storage)
    }

    async fn comment_of(store: &InMemoryStore, author: &User) -> Comment {
        let product = store.add_product();
        add(
            store,
            author,
            NewComment {
                product_id: product,
                text: "Great tour".to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn only_the_author_deletes_a_comment() {
        let store = InMemoryStore::default();
        let (_dir, storage) = storage();
        let author = User::fixture(Role::User);
        let admin = User::fixture(Role::Admin);
        let comment = comment_of(&store, &author).await;

        let err = delete(&store, &storage, &admin, comment.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Denied(DenyReason::NotOwner)));

        delete(&store, &storage, &author, comment.id).await.unwrap();
        assert!(matches!(
            delete(&store, &storage, &author, comment.id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn comments_need_an_existing_product() {
        let store = InMemoryStore::default();
        let author = User::fixture(Role::User);

        let err = add(
            &store,
            &author,
            NewComment {
                product_id: Uuid::new_v4(),
                text: "?".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn media_is_stored_under_numbered_keys_and_removed_with_the_comment() {
        let store = InMemoryStore::default();
        let (_dir, storage) = storage();
        let author = User::fixture(Role::User);
        let comment = comment_of(&store, &author).await;

        attach_media(&store, &storage, &author, comment.id, "jpg", b"first")
            .await
            .unwrap();
        let comment = attach_media(&store, &storage, &author, comment.id, "png", b"second")
            .await
            .unwrap();

        let first = media_key(comment.id, 0, "jpg");
        let second = media_key(comment.id, 1, "png");
        assert_eq!(comment.media, vec![first.clone(), second.clone()]);
        assert_eq!(
            storage.get(Namespace::Media, &second).await.unwrap(),
            Some(b"second".to_vec())
        );

        delete(&store, &storage, &author, comment.id).await.unwrap();
        assert_eq!(storage.get(Namespace::Media, &first).await.unwrap(), None);
        assert_eq!(storage.get(Namespace::Media, &second).await.unwrap(), None);
    }

    #[tokio::test]
    async fn only_the_author_attaches_media() {
        let store = InMemoryStore::default();
        let (_dir, storage) = storage();
        let author = User::fixture(Role::User);
        let other = User::fixture(Role::User);
        let comment = comment_of(&store, &author).await;

        let err = attach_media(&store, &storage, &other, comment.id, "jpg", b"x")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Denied(DenyReason::NotOwner)));
        assert_eq!(
            storage
                .get(Namespace::Media, &media_key(comment.id, 0, "jpg"))
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn media_count_is_capped() {
        let store = InMemoryStore::default();
        let (_dir, storage) = storage();
        let author = User::fixture(Role::User);
        let comment = comment_of(&store, &author).await;

        for _ in 0..MAX_MEDIA {
            attach_media(&store, &storage, &author, comment.id, "webp", b"x")
                .await
                .unwrap();
        }

        let err = attach_media(&store, &storage, &author, comment.id, "webp", b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn media_keys_carry_comment_and_index() {
        let id = Uuid::parse_str("3f2c1b7e-7a41-4c35-9a0e-5d7f1e2b9c11").unwrap();
        assert_eq!(
            media_key(id, 2, "jpg"),
            "3f2c1b7e-7a41-4c35-9a0e-5d7f1e2b9c11_2.jpg"
        );
    }
}
