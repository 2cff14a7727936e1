use crate::errors::AppError;
use crate::models::{Comment, Request, Role, User};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::debug;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Closes every pooled connection. Further queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn insert_user(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, role, password, phone, since)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, role, password, phone, since
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role)
        .bind(&user.password)
        .bind(&user.phone)
        .bind(user.since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_insert(e, "user"))
    }

    pub async fn insert_request(&self, request: &Request) -> Result<Request, AppError> {
        sqlx::query_as(
            r#"
            INSERT INTO requests (id, title, description, "type", status, client_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, "type", status, client_id, created_at
            "#,
        )
        .bind(request.id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.kind)
        .bind(request.status)
        .bind(&request.client_id)
        .bind(request.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_insert(e, "request"))
    }

    pub async fn insert_comment(&self, comment: &Comment) -> Result<Comment, AppError> {
        sqlx::query_as(
            r#"
            INSERT INTO comments (id, content, request_id, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, content, request_id, user_id, created_at
            "#,
        )
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.request_id)
        .bind(&comment.user_id)
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_insert(e, "comment"))
    }

    pub async fn delete_all_comments(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM comments")
            .execute(&self.pool)
            .await?;
        debug!("Deleted {} comments", result.rows_affected());
        Ok(result.rows_affected())
    }

    pub async fn delete_all_requests(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM requests")
            .execute(&self.pool)
            .await?;
        debug!("Deleted {} requests", result.rows_affected());
        Ok(result.rows_affected())
    }

    pub async fn delete_all_users(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        debug!("Deleted {} users", result.rows_affected());
        Ok(result.rows_affected())
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as(
            r#"
            SELECT id, name, email, role, password, phone, since
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as(
            r#"
            SELECT id, name, email, role, password, phone, since
            FROM users
            ORDER BY since
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn count_users_by_role(&self, role: Role) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn get_requests(&self) -> Result<Vec<Request>, AppError> {
        let requests = sqlx::query_as(
            r#"
            SELECT id, title, description, "type", status, client_id, created_at
            FROM requests
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn get_comments(&self) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as(
            r#"
            SELECT id, content, request_id, user_id, created_at
            FROM comments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
