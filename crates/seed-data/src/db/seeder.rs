//! Database seeding utilities.

use agency::auth;
use agency::errors::AppError;
use agency::models::{Comment, Request, Role, User};
use futures::future::try_join_all;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, info};

use crate::config::UserFixture;
use crate::db::SeedStore;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] AppError),
    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),
    #[error("Password hashing task failed: {0}")]
    HashTask(#[from] JoinError),
}

/// Rows removed by [`Seeder::clear_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeCounts {
    pub comments: u64,
    pub requests: u64,
    pub users: u64,
}

/// Writes seed records through a [`SeedStore`], one phase at a time.
///
/// Phases that insert several rows issue every insert concurrently and wait
/// for all of them. The first failure fails the phase.
pub struct Seeder<S> {
    store: S,
}

impl<S: SeedStore> Seeder<S> {
    /// Creates a new seeder over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Clears all seeded data.
    ///
    /// **WARNING**: This deletes every user, request, and comment.
    pub async fn clear_all(&self) -> Result<PurgeCounts, SeedError> {
        info!("Clearing all seeded data...");

        // Order matters due to foreign key constraints
        let comments = self.store.delete_all_comments().await?;
        let requests = self.store.delete_all_requests().await?;
        let users = self.store.delete_all_users().await?;

        info!("Cleared {comments} comments, {requests} requests, {users} users");
        Ok(PurgeCounts {
            comments,
            requests,
            users,
        })
    }

    /// Seeds the administrator account.
    pub async fn seed_admin(
        &self,
        fixture: &UserFixture,
        password: &str,
        hash_cost: u32,
    ) -> Result<User, SeedError> {
        let id = fixture.id.clone().ok_or_else(|| {
            SeedError::InvalidFixture("admin must have a literal id".to_string())
        })?;
        let password_hash = hash_password(password, hash_cost).await?;

        let admin = User::with_id(
            id,
            fixture.name.clone(),
            fixture.email.clone(),
            Role::Admin,
            password_hash,
            fixture.phone.clone(),
            fixture.since,
        );
        let admin = self.store.create_user(admin).await?;

        info!("Seeded {} {}", admin.role.as_str(), admin.email);
        Ok(admin)
    }

    /// Seeds client accounts, hashing each password separately.
    ///
    /// The returned users are in fixture order.
    pub async fn seed_clients(
        &self,
        fixtures: &[UserFixture],
        password: &str,
        hash_cost: u32,
    ) -> Result<Vec<User>, SeedError> {
        info!("Seeding {} clients...", fixtures.len());

        let clients = try_join_all(fixtures.iter().map(|fixture| async move {
            let password_hash = hash_password(password, hash_cost).await?;
            let client = client_from_fixture(fixture, password_hash);
            debug!("Creating {} {}", client.role.as_str(), client.email);
            Ok::<_, SeedError>(self.store.create_user(client).await?)
        }))
        .await?;

        info!("Seeded {} clients", clients.len());
        Ok(clients)
    }

    /// Seeds requests. Every `client_id` must already exist.
    pub async fn seed_requests(&self, requests: Vec<Request>) -> Result<Vec<Request>, SeedError> {
        info!("Seeding {} requests...", requests.len());

        let requests = try_join_all(requests.into_iter().map(|request| {
            debug!(
                "Creating {} request \"{}\" for {}",
                request.status.as_str(),
                request.title,
                request.client_id
            );
            self.store.create_request(request)
        }))
        .await?;

        info!("Seeded {} requests", requests.len());
        Ok(requests)
    }

    /// Seeds comments. Every `request_id` and `user_id` must already exist.
    pub async fn seed_comments(&self, comments: Vec<Comment>) -> Result<Vec<Comment>, SeedError> {
        info!("Seeding {} comments...", comments.len());

        let comments = try_join_all(
            comments
                .into_iter()
                .map(|comment| self.store.create_comment(comment)),
        )
        .await?;

        info!("Seeded {} comments", comments.len());
        Ok(comments)
    }

    /// Releases the store's connections.
    pub async fn close(&self) {
        self.store.close().await;
        debug!("Seed store closed");
    }
}

fn client_from_fixture(fixture: &UserFixture, password_hash: String) -> User {
    let name = fixture.name.clone();
    let email = fixture.email.clone();
    let phone = fixture.phone.clone();

    match &fixture.id {
        Some(id) => User::with_id(
            id.clone(),
            name,
            email,
            Role::Client,
            password_hash,
            phone,
            fixture.since,
        ),
        None => User::new(name, email, Role::Client, password_hash, phone, fixture.since),
    }
}

/// bcrypt is CPU-bound; run it on the blocking pool.
async fn hash_password(password: &str, cost: u32) -> Result<String, SeedError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || auth::hash_password(&password, cost)).await??;
    Ok(hash)
}
