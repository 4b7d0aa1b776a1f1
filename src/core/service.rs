//! Services combining whole-table storage with the domain rules
//!
//! Each service owns the store for one table. Reads load the table and work
//! on the snapshot. Writes take the table's write lock for the whole
//! load -> mutate -> save pass so concurrent requests in this process cannot
//! lose each other's rows.

use crate::core::auth::{self, AccountPolicy};
use crate::core::donation::{DonationRequest, NewDonation};
use crate::core::error::{AuthError, CatalogError, DonationError, EstyleResult};
use crate::core::filter::{self, FilterParams};
use crate::core::item::{Item, ItemStatus, NewItem};
use crate::core::session::{Session, SessionManager};
use crate::core::store::{TableStore, next_id};
use crate::core::user::{User, UserProfile};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Browsing, listing and renting catalog items
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn TableStore<Item>>,
    write_lock: Arc<Mutex<()>>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn TableStore<Item>>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Filter and sort the current catalog
    pub async fn search(&self, params: &FilterParams) -> EstyleResult<Vec<Item>> {
        let catalog = self.store.load().await?;
        let results = filter::filter(&catalog, params);
        tracing::debug!(
            total = catalog.len(),
            matched = results.len(),
            "catalog search"
        );
        Ok(results)
    }

    pub async fn get(&self, id: u64) -> EstyleResult<Item> {
        self.store
            .load()
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| CatalogError::ItemNotFound { id }.into())
    }

    /// Add a new item owned by `owner`; it gets the next free id
    pub async fn list_item(&self, owner: &str, new_item: NewItem) -> EstyleResult<Item> {
        new_item
            .validate()
            .map_err(|message| CatalogError::InvalidItem { message })?;

        let _guard = self.write_lock.lock().await;
        let mut catalog = self.store.load().await?;
        let id = next_id::<Item>(catalog.iter().map(|item| item.id))?;
        let item = new_item.into_item(id, owner);

        catalog.push(item.clone());
        self.store.save(&catalog).await?;

        tracing::info!(id = item.id, owner = %owner, "item listed");
        Ok(item)
    }

    /// Rent an available item
    pub async fn rent(&self, id: u64, renter: &str) -> EstyleResult<Item> {
        let _guard = self.write_lock.lock().await;
        let mut catalog = self.store.load().await?;

        let item = catalog
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CatalogError::ItemNotFound { id })?;

        if !item.is_available() {
            return Err(CatalogError::ItemNotAvailable {
                id,
                status: item.status.to_string(),
            }
            .into());
        }

        item.status = ItemStatus::Rented;
        let rented = item.clone();
        self.store.save(&catalog).await?;

        tracing::info!(id, renter = %renter, "item rented");
        Ok(rented)
    }
}

/// Signup, login and session handling
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn TableStore<User>>,
    write_lock: Arc<Mutex<()>>,
    sessions: SessionManager,
    policy: AccountPolicy,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn TableStore<User>>,
        sessions: SessionManager,
        policy: AccountPolicy,
    ) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
            sessions,
            policy,
        }
    }

    pub fn policy(&self) -> &AccountPolicy {
        &self.policy
    }

    /// Create an account and persist the user table
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> EstyleResult<String> {
        let username = username.trim();
        let email = email.trim();

        let _guard = self.write_lock.lock().await;
        let mut users = self.store.load().await?;
        let created = auth::register(&mut users, username, password, email, &self.policy)?;
        self.store.save(&users).await?;

        tracing::info!(username = %created, "account registered");
        Ok(created)
    }

    /// Authenticate and open a session
    pub async fn login(&self, identifier: &str, password: &str) -> EstyleResult<Session> {
        let users = self.store.load().await?;
        let username = match auth::authenticate(&users, identifier.trim(), password, &self.policy)
        {
            Ok(username) => username,
            Err(err) => {
                tracing::warn!(identifier = %identifier, error = %err, "login rejected");
                return Err(err.into());
            }
        };

        let session = self.sessions.open(&username).await;
        tracing::info!(username = %username, "login");
        Ok(session)
    }

    /// Close a session; returns whether it was open
    pub async fn logout(&self, token: &Uuid) -> bool {
        let closed = self.sessions.close(token).await;
        if closed {
            tracing::info!(token = %token, "logout");
        }
        closed
    }

    /// Resolve a live session by token
    pub async fn session(&self, token: &Uuid) -> Option<Session> {
        self.sessions.get(token).await
    }

    /// Profile of a registered user
    pub async fn profile(&self, username: &str) -> EstyleResult<UserProfile> {
        self.store
            .load()
            .await?
            .iter()
            .find(|user| user.username == username)
            .map(UserProfile::from)
            .ok_or_else(|| {
                AuthError::IdentifierNotFound {
                    identifier: username.to_string(),
                }
                .into()
            })
    }
}

/// Charity donation requests
#[derive(Clone)]
pub struct DonationService {
    store: Arc<dyn TableStore<DonationRequest>>,
    write_lock: Arc<Mutex<()>>,
}

impl DonationService {
    pub fn new(store: Arc<dyn TableStore<DonationRequest>>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn submit(
        &self,
        username: &str,
        donation: NewDonation,
    ) -> EstyleResult<DonationRequest> {
        donation
            .validate()
            .map_err(|message| DonationError::Invalid { message })?;

        let _guard = self.write_lock.lock().await;
        let mut requests = self.store.load().await?;
        let id = next_id::<DonationRequest>(requests.iter().map(|r| r.id))?;
        let request = donation.into_request(id, username);

        requests.push(request.clone());
        self.store.save(&requests).await?;

        tracing::info!(id, username = %username, quantity = request.quantity, "donation submitted");
        Ok(request)
    }

    /// Requests submitted by `username`, oldest first
    pub async fn list_for(&self, username: &str) -> EstyleResult<Vec<DonationRequest>> {
        Ok(self
            .store
            .load()
            .await?
            .into_iter()
            .filter(|r| r.username == username)
            .collect())
    }
}
