//! In-memory seed store that enforces the portal schema's constraints.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use agency::errors::AppError;
use agency::models::{Comment, Request, Role, User};
use async_trait::async_trait;
use seed_data::db::SeedStore;
use time::OffsetDateTime;

#[derive(Default)]
pub struct State {
    pub users: Vec<User>,
    pub requests: Vec<Request>,
    pub comments: Vec<Comment>,
    pub closed: bool,
    /// Insert attempts, successful or not.
    pub user_inserts: usize,
    pub request_inserts: usize,
    pub comment_inserts: usize,
    /// Emails whose insert fails as a unique violation.
    pub rejected_emails: HashSet<String>,
    pub fail_request_inserts: bool,
    /// Clock reading at the most recent successful user insert.
    pub last_user_insert_at: Option<OffsetDateTime>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap()
    }

    pub fn reject_email(&self, email: &str) {
        self.state().rejected_emails.insert(email.to_string());
    }

    pub fn fail_request_inserts(&self) {
        self.state().fail_request_inserts = true;
    }

    pub fn reopen(&self) {
        self.state().closed = false;
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.state().users.iter().filter(|u| u.role == role).count()
    }
}

fn ensure_open(state: &State) -> Result<(), AppError> {
    if state.closed {
        return Err(AppError::Database(sqlx::Error::PoolClosed));
    }
    Ok(())
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn delete_all_comments(&self) -> Result<u64, AppError> {
        let mut state = self.state();
        ensure_open(&state)?;
        let n = state.comments.len() as u64;
        state.comments.clear();
        Ok(n)
    }

    async fn delete_all_requests(&self) -> Result<u64, AppError> {
        let mut state = self.state();
        ensure_open(&state)?;
        if !state.comments.is_empty() {
            return Err(AppError::InvalidInput(
                "foreign key violation: comments reference requests".to_string(),
            ));
        }
        let n = state.requests.len() as u64;
        state.requests.clear();
        Ok(n)
    }

    async fn delete_all_users(&self) -> Result<u64, AppError> {
        let mut state = self.state();
        ensure_open(&state)?;
        if !state.requests.is_empty() || !state.comments.is_empty() {
            return Err(AppError::InvalidInput(
                "foreign key violation: rows reference users".to_string(),
            ));
        }
        let n = state.users.len() as u64;
        state.users.clear();
        Ok(n)
    }

    async fn create_user(&self, user: User) -> Result<User, AppError> {
        let mut state = self.state();
        ensure_open(&state)?;
        state.user_inserts += 1;

        if state.rejected_emails.contains(&user.email)
            || state.users.iter().any(|u| u.email == user.email)
        {
            return Err(AppError::Conflict(format!(
                "user already exists: {}",
                user.email
            )));
        }
        if state.users.iter().any(|u| u.id == user.id) {
            return Err(AppError::Conflict(format!("user already exists: {}", user.id)));
        }

        state.users.push(user.clone());
        state.last_user_insert_at = Some(OffsetDateTime::now_utc());
        Ok(user)
    }

    async fn create_request(&self, request: Request) -> Result<Request, AppError> {
        let mut state = self.state();
        ensure_open(&state)?;
        state.request_inserts += 1;

        if state.fail_request_inserts {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        if !state.users.iter().any(|u| u.id == request.client_id) {
            return Err(AppError::InvalidInput(format!(
                "foreign key violation: no user {}",
                request.client_id
            )));
        }

        state.requests.push(request.clone());
        Ok(request)
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, AppError> {
        let mut state = self.state();
        ensure_open(&state)?;
        state.comment_inserts += 1;

        if !state.requests.iter().any(|r| r.id == comment.request_id) {
            return Err(AppError::InvalidInput(format!(
                "foreign key violation: no request {}",
                comment.request_id
            )));
        }
        if !state.users.iter().any(|u| u.id == comment.user_id) {
            return Err(AppError::InvalidInput(format!(
                "foreign key violation: no user {}",
                comment.user_id
            )));
        }

        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn close(&self) {
        self.state().closed = true;
    }
}
