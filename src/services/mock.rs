//! In-memory stand-in for PostgreSQL used by the service unit tests.

use crate::models::{Comment, Place, Product, ProductType, Rating, RatingSummary, RatingTarget, Role, User};
use crate::services::account::AccountStore;
use crate::services::catalog::CatalogStore;
use crate::services::comment::CommentStore;
use crate::services::favorite::FavoriteStore;
use crate::services::rating::RatingStore;
use crate::services::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    products: HashMap<Uuid, Product>,
    places: HashMap<Uuid, Place>,
    ratings: Vec<Rating>,
    favorites: BTreeSet<(Uuid, Uuid)>,
    comments: HashMap<Uuid, Comment>,
    tags: HashMap<Uuid, Vec<String>>,
    sessions: HashMap<String, (Uuid, DateTime<Utc>)>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    mutations: AtomicUsize,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn add_product(&self) -> Uuid {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: "Product".to_string(),
            short: None,
            description: None,
            product_type: ProductType::Excursion,
            active: true,
            image: None,
            created_at: now,
            updated_at: now,
        };
        let id = product.id;
        self.state.lock().unwrap().products.insert(id, product);
        id
    }

    pub fn add_place(&self) -> Uuid {
        let now = Utc::now();
        let place = Place {
            id: Uuid::new_v4(),
            name: "Place".to_string(),
            short: None,
            description: None,
            city: "Riga".to_string(),
            address: None,
            image: None,
            created_at: now,
            updated_at: now,
        };
        let id = place.id;
        self.state.lock().unwrap().places.insert(id, place);
        id
    }

    pub fn add_user(&self, role: Role) -> User {
        let user = User::fixture(role);
        self.put_user(user.clone());
        user
    }

    pub fn put_user(&self, user: User) {
        self.state.lock().unwrap().users.insert(user.id, user);
    }

    pub fn has_user(&self, id: Uuid) -> bool {
        self.state.lock().unwrap().users.contains_key(&id)
    }

    pub fn has_product(&self, id: Uuid) -> bool {
        self.state.lock().unwrap().products.contains_key(&id)
    }

    pub fn has_place(&self, id: Uuid) -> bool {
        self.state.lock().unwrap().places.contains_key(&id)
    }

    pub fn has_session(&self, token: &str) -> bool {
        self.state.lock().unwrap().sessions.contains_key(token)
    }

    pub fn ratings_of(&self, user_id: Uuid, target: RatingTarget) -> Vec<i16> {
        self.state
            .lock()
            .unwrap()
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id && r.target() == Some(target))
            .map(|r| r.value)
            .collect()
    }

    pub fn rating_id(&self, user_id: Uuid, target: RatingTarget) -> Option<Uuid> {
        self.state
            .lock()
            .unwrap()
            .ratings
            .iter()
            .find(|r| r.user_id == user_id && r.target() == Some(target))
            .map(|r| r.id)
    }

    pub fn favorites_of(&self, user_id: Uuid) -> Vec<Uuid> {
        self.state
            .lock()
            .unwrap()
            .favorites
            .iter()
            .filter(|(user, _)| *user == user_id)
            .map(|(_, product)| *product)
            .collect()
    }

    pub fn tags_of(&self, product_id: Uuid) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .tags
            .get(&product_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of write calls that reached the store.
    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    /// Makes every following write fail like a lost database connection.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn write(&self) -> Result<std::sync::MutexGuard<'_, State>, StoreError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database("Failed to execute query".to_string()));
        }
        Ok(self.state.lock().unwrap())
    }

    fn read(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl RatingStore for InMemoryStore {
    async fn target_exists(&self, target: RatingTarget) -> Result<bool, StoreError> {
        let state = self.read();
        Ok(match target {
            RatingTarget::Product(id) => state.products.contains_key(&id),
            RatingTarget::Place(id) => state.places.contains_key(&id),
        })
    }

    async fn upsert(&self, user_id: Uuid, target: RatingTarget, value: i16) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        let now = Utc::now();
        if let Some(rating) = state
            .ratings
            .iter_mut()
            .find(|r| r.user_id == user_id && r.target() == Some(target))
        {
            rating.value = value;
            rating.updated_at = now;
            return Ok(false);
        }

        let (product_id, place_id) = match target {
            RatingTarget::Product(id) => (Some(id), None),
            RatingTarget::Place(id) => (None, Some(id)),
        };
        state.ratings.push(Rating {
            id: Uuid::new_v4(),
            value,
            user_id,
            product_id,
            place_id,
            created_at: now,
            updated_at: now,
        });
        Ok(true)
    }

    async fn remove(&self, user_id: Uuid, target: RatingTarget) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        let before = state.ratings.len();
        state
            .ratings
            .retain(|r| !(r.user_id == user_id && r.target() == Some(target)));
        Ok(state.ratings.len() != before)
    }

    async fn summary(&self, target: RatingTarget) -> Result<RatingSummary, StoreError> {
        let state = self.read();
        let values: Vec<i64> = state
            .ratings
            .iter()
            .filter(|r| r.target() == Some(target))
            .map(|r| i64::from(r.value))
            .collect();
        Ok(RatingSummary {
            ratings_sum: values.iter().sum(),
            ratings_count: values.len() as i64,
        })
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Rating>, StoreError> {
        Ok(self.read().ratings.iter().find(|r| r.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        let before = state.ratings.len();
        state.ratings.retain(|r| r.id != id);
        Ok(state.ratings.len() != before)
    }
}

#[async_trait]
impl FavoriteStore for InMemoryStore {
    async fn product_exists(&self, product_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.read().products.contains_key(&product_id))
    }

    async fn add(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.write()?.favorites.insert((user_id, product_id)))
    }

    async fn remove(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.write()?.favorites.remove(&(user_id, product_id)))
    }
}

#[async_trait]
impl CommentStore for InMemoryStore {
    async fn product_exists(&self, product_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.read().products.contains_key(&product_id))
    }

    async fn fetch_comment(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        Ok(self.read().comments.get(&id).cloned())
    }

    async fn insert_comment(&self, comment: Comment) -> Result<Comment, StoreError> {
        self.write()?.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.write()?.comments.remove(&id).is_some())
    }

    async fn append_media(
        &self,
        id: Uuid,
        expected_len: usize,
        key: &str,
    ) -> Result<Option<Comment>, StoreError> {
        let mut state = self.write()?;
        Ok(match state.comments.get_mut(&id) {
            Some(comment) if comment.media.len() == expected_len => {
                comment.media.push(key.to_string());
                Some(comment.clone())
            }
            _ => None,
        })
    }

    async fn remove_media(&self, id: Uuid, key: &str) -> Result<(), StoreError> {
        if let Some(comment) = self.write()?.comments.get_mut(&id) {
            comment.media.retain(|media| media != key);
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn fetch_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(self.read().products.get(&id).cloned())
    }

    async fn insert_product(&self, product: Product, tags: &[String]) -> Result<Product, StoreError> {
        let mut state = self.write()?;
        state.tags.insert(product.id, tags.to_vec());
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, product: Product, tags: &[String]) -> Result<Product, StoreError> {
        let mut state = self.write()?;
        state.tags.insert(product.id, tags.to_vec());
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(self.write()?.products.remove(&id))
    }

    async fn fetch_place(&self, id: Uuid) -> Result<Option<Place>, StoreError> {
        Ok(self.read().places.get(&id).cloned())
    }

    async fn insert_place(&self, place: Place) -> Result<Place, StoreError> {
        self.write()?.places.insert(place.id, place.clone());
        Ok(place)
    }

    async fn update_place(&self, place: Place) -> Result<Place, StoreError> {
        self.write()?.places.insert(place.id, place.clone());
        Ok(place)
    }

    async fn delete_place(&self, id: Uuid) -> Result<Option<Place>, StoreError> {
        Ok(self.write()?.places.remove(&id))
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<User>, StoreError> {
        let mut state = self.write()?;
        Ok(state.users.get_mut(&id).map(|user| {
            user.role = role;
            user.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.write()?.users.remove(&id))
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn username_or_email_taken(&self, username: &str, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .read()
            .users
            .values()
            .any(|user| user.username == username || user.email == email))
    }

    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        self.write()?.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn fetch_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn set_activate_code(&self, user_id: Uuid, code: &str) -> Result<(), StoreError> {
        if let Some(user) = self.write()?.users.get_mut(&user_id) {
            user.activate_code = Some(code.to_string());
        }
        Ok(())
    }

    async fn activate(&self, code: &str) -> Result<Option<User>, StoreError> {
        let mut state = self.write()?;
        Ok(state
            .users
            .values_mut()
            .find(|user| user.activate_code.as_deref() == Some(code))
            .map(|user| {
                user.activated_at = Some(Utc::now());
                user.activate_code = None;
                user.clone()
            }))
    }

    async fn insert_session(&self, token: &str, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), StoreError> {
        self.write()?
            .sessions
            .insert(token.to_string(), (user_id, expires_at));
        Ok(())
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.write()?.sessions.remove(token);
        Ok(())
    }
}
