use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
        }
    }
}

/// A portal account. `password` always holds a bcrypt hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: Option<String>,
    pub since: OffsetDateTime,
}

impl User {
    /// Builds a user with a freshly generated id.
    pub fn new(
        name: String,
        email: String,
        role: Role,
        password_hash: String,
        phone: Option<String>,
        since: OffsetDateTime,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            name,
            email,
            role,
            password_hash,
            phone,
            since,
        )
    }

    pub fn with_id(
        id: String,
        name: String,
        email: String,
        role: Role,
        password_hash: String,
        phone: Option<String>,
        since: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            password: password_hash,
            phone,
            since,
        }
    }
}

/// A service ticket opened on behalf of a client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Request {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub status: RequestStatus,
    pub client_id: String,
    pub created_at: OffsetDateTime,
}

impl Request {
    pub fn new(
        title: String,
        description: String,
        kind: String,
        status: RequestStatus,
        client_id: String,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            kind,
            status,
            client_id,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub request_id: Uuid,
    pub user_id: String,
    pub created_at: OffsetDateTime,
}

impl Comment {
    pub fn new(
        content: String,
        request_id: Uuid,
        user_id: String,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            request_id,
            user_id,
            created_at,
        }
    }
}
