//! Storage seam used by the seeder.

use agency::database::Database;
use agency::errors::AppError;
use agency::models::{Comment, Request, User};
use async_trait::async_trait;

/// The write operations a seed run needs from the database.
///
/// `create_*` return the row as persisted.
#[async_trait]
pub trait SeedStore: Send + Sync {
    async fn delete_all_comments(&self) -> Result<u64, AppError>;

    async fn delete_all_requests(&self) -> Result<u64, AppError>;

    async fn delete_all_users(&self) -> Result<u64, AppError>;

    async fn create_user(&self, user: User) -> Result<User, AppError>;

    async fn create_request(&self, request: Request) -> Result<Request, AppError>;

    async fn create_comment(&self, comment: Comment) -> Result<Comment, AppError>;

    /// Releases the underlying connection(s).
    async fn close(&self);
}

#[async_trait]
impl SeedStore for Database {
    async fn delete_all_comments(&self) -> Result<u64, AppError> {
        Database::delete_all_comments(self).await
    }

    async fn delete_all_requests(&self) -> Result<u64, AppError> {
        Database::delete_all_requests(self).await
    }

    async fn delete_all_users(&self) -> Result<u64, AppError> {
        Database::delete_all_users(self).await
    }

    async fn create_user(&self, user: User) -> Result<User, AppError> {
        self.insert_user(&user).await
    }

    async fn create_request(&self, request: Request) -> Result<Request, AppError> {
        self.insert_request(&request).await
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, AppError> {
        self.insert_comment(&comment).await
    }

    async fn close(&self) {
        Database::close(self).await;
    }
}
