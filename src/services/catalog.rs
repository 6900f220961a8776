//! Admin catalog actions: role gated create, update and delete of places,
//! products and users.

use crate::db;
use crate::forms::{
    DeletePlaceForm, DeleteProductForm, DeleteUserForm, FormRejection, PlaceForm, ProductForm,
    RoleForm,
};
use crate::helpers::{FileStorage, Namespace};
use crate::middleware::authorization::require;
use crate::models::{Place, Product, Role, User};
use crate::services::{ServiceError, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub const PLACE_MANAGERS: &[Role] = &[Role::Admin, Role::Placeowner];
pub const PRODUCT_MANAGERS: &[Role] = &[Role::Admin, Role::Creator];
pub const USER_MANAGERS: &[Role] = &[Role::Admin];

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn fetch_product(&self, id: Uuid) -> Result<Option<Product>, StoreError>;
    async fn insert_product(&self, product: Product, tags: &[String]) -> Result<Product, StoreError>;
    async fn update_product(&self, product: Product, tags: &[String]) -> Result<Product, StoreError>;
    async fn delete_product(&self, id: Uuid) -> Result<Option<Product>, StoreError>;

    async fn fetch_place(&self, id: Uuid) -> Result<Option<Place>, StoreError>;
    async fn insert_place(&self, place: Place) -> Result<Place, StoreError>;
    async fn update_place(&self, place: Place) -> Result<Place, StoreError>;
    async fn delete_place(&self, id: Uuid) -> Result<Option<Place>, StoreError>;

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<User>, StoreError>;
    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl CatalogStore for PgPool {
    async fn fetch_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(db::product::fetch(self, id).await?)
    }

    async fn insert_product(&self, product: Product, tags: &[String]) -> Result<Product, StoreError> {
        let product = db::product::insert(self, product).await?;
        db::tag::replace_for_product(self, product.id, tags).await?;
        Ok(product)
    }

    async fn update_product(&self, product: Product, tags: &[String]) -> Result<Product, StoreError> {
        let product = db::product::update(self, product).await?;
        db::tag::replace_for_product(self, product.id, tags).await?;
        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(db::product::delete(self, id).await?)
    }

    async fn fetch_place(&self, id: Uuid) -> Result<Option<Place>, StoreError> {
        Ok(db::place::fetch(self, id).await?)
    }

    async fn insert_place(&self, place: Place) -> Result<Place, StoreError> {
        Ok(db::place::insert(self, place).await?)
    }

    async fn update_place(&self, place: Place) -> Result<Place, StoreError> {
        Ok(db::place::update(self, place).await?)
    }

    async fn delete_place(&self, id: Uuid) -> Result<Option<Place>, StoreError> {
        Ok(db::place::delete(self, id).await?)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<User>, StoreError> {
        Ok(db::user::update_role(self, id, role).await?)
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(db::user::delete(self, id).await?)
    }
}

/// Stored files are best effort: a failed removal is logged, the delete stands.
async fn remove_files(storage: &FileStorage, namespace: Namespace, id: Uuid, key: Option<&str>) {
    if let Some(key) = key {
        if let Err(err) = storage.remove(namespace, key).await {
            tracing::error!("Failed to remove {}/{}: {}", namespace, key, err);
        }
    }
    if let Err(err) = storage.remove_thumbnails(id).await {
        tracing::error!("Failed to remove thumbnails of {}: {}", id, err);
    }
}

pub async fn delete_place<S>(
    store: &S,
    storage: &FileStorage,
    session: Option<&User>,
    form: &DeletePlaceForm,
) -> Result<Place, ServiceError>
where
    S: CatalogStore + ?Sized,
{
    let user = require(session, PLACE_MANAGERS)?;
    let id = form.parse()?;

    let place = store
        .delete_place(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Place {} not found", id)))?;
    tracing::info!(place_id = %id, by = %user.id, "Place deleted");

    remove_files(storage, Namespace::Places, id, place.image.as_deref()).await;
    Ok(place)
}

pub async fn delete_product<S>(
    store: &S,
    storage: &FileStorage,
    session: Option<&User>,
    form: &DeleteProductForm,
) -> Result<Product, ServiceError>
where
    S: CatalogStore + ?Sized,
{
    let user = require(session, PRODUCT_MANAGERS)?;
    let id = form.parse()?;

    let product = store
        .delete_product(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;
    tracing::info!(product_id = %id, by = %user.id, "Product deleted");

    remove_files(storage, Namespace::Products, id, product.image.as_deref()).await;
    Ok(product)
}

pub async fn delete_user<S>(
    store: &S,
    storage: &FileStorage,
    session: Option<&User>,
    form: &DeleteUserForm,
) -> Result<User, ServiceError>
where
    S: CatalogStore + ?Sized,
{
    let admin = require(session, USER_MANAGERS)?;
    let id = form.parse()?;
    if id == admin.id {
        return Err(FormRejection::form("You cannot delete your own account").into());
    }

    let user = store
        .delete_user(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))?;
    tracing::info!(user_id = %id, by = %admin.id, "User deleted");

    remove_files(storage, Namespace::Avatars, id, user.avatar.as_deref()).await;
    Ok(user)
}

pub async fn create_product<S>(
    store: &S,
    session: Option<&User>,
    form: &ProductForm,
) -> Result<Product, ServiceError>
where
    S: CatalogStore + ?Sized,
{
    require(session, PRODUCT_MANAGERS)?;
    let input = form.parse()?;

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4(),
        name: input.name,
        short: input.short,
        description: input.description,
        product_type: input.product_type,
        active: input.active,
        image: None,
        created_at: now,
        updated_at: now,
    };

    Ok(store.insert_product(product, &input.tags).await?)
}

pub async fn update_product<S>(
    store: &S,
    session: Option<&User>,
    id: Uuid,
    form: &ProductForm,
) -> Result<Product, ServiceError>
where
    S: CatalogStore + ?Sized,
{
    require(session, PRODUCT_MANAGERS)?;
    let input = form.parse()?;

    let mut product = store
        .fetch_product(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;
    product.name = input.name;
    product.short = input.short;
    product.description = input.description;
    product.product_type = input.product_type;
    product.active = input.active;

    Ok(store.update_product(product, &input.tags).await?)
}

pub async fn create_place<S>(
    store: &S,
    session: Option<&User>,
    form: &PlaceForm,
) -> Result<Place, ServiceError>
where
    S: CatalogStore + ?Sized,
{
    require(session, PLACE_MANAGERS)?;
    let input = form.parse()?;

    let now = Utc::now();
    let place = Place {
        id: Uuid::new_v4(),
        name: input.name,
        short: input.short,
        description: input.description,
        city: input.city,
        address: input.address,
        image: None,
        created_at: now,
        updated_at: now,
    };

    Ok(store.insert_place(place).await?)
}

pub async fn update_place<S>(
    store: &S,
    session: Option<&User>,
    id: Uuid,
    form: &PlaceForm,
) -> Result<Place, ServiceError>
where
    S: CatalogStore + ?Sized,
{
    require(session, PLACE_MANAGERS)?;
    let input = form.parse()?;

    let mut place = store
        .fetch_place(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Place {} not found", id)))?;
    place.name = input.name;
    place.short = input.short;
    place.description = input.description;
    place.city = input.city;
    place.address = input.address;

    Ok(store.update_place(place).await?)
}

pub async fn change_role<S>(
    store: &S,
    session: Option<&User>,
    id: Uuid,
    form: &RoleForm,
) -> Result<User, ServiceError>
where
    S: CatalogStore + ?Sized,
{
    let admin = require(session, USER_MANAGERS)?;
    let role = form.parse()?;
    if id == admin.id && role != Role::Admin {
        return Err(FormRejection::form("You cannot demote your own account").into());
    }

    let user = store
        .update_role(id, role)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))?;
    tracing::info!(user_id = %id, role = %role, by = %admin.id, "Role changed");

    Ok(user)
}
