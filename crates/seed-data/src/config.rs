//! Fixture definitions for seeding.
//!
//! Every record the seeder writes is described here as plain data. Cross-record
//! links (a request's client, a comment's request and author) are positional
//! indices into the fixture lists, resolved to real ids once the referenced
//! rows exist.

use std::collections::HashSet;

use agency::models::RequestStatus;
use serde::{Deserialize, Serialize};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::db::SeedError;

/// Profile of a user account to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFixture {
    /// Literal id. Generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Start of the account or partnership.
    #[serde(with = "time::serde::rfc3339")]
    pub since: OffsetDateTime,
}

/// A service request owned by `clients[client]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFixture {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: RequestStatus,
    pub client: usize,
}

/// Who wrote a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    Admin,
    Client(usize),
}

/// A comment on `requests[request]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentFixture {
    pub content: String,
    pub request: usize,
    pub author: Author,
}

/// The complete dataset written by one seed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFixtures {
    /// Plaintext shared by every seeded account. Only its hash is stored.
    pub password: String,
    /// bcrypt work factor.
    pub hash_cost: u32,
    pub admin: UserFixture,
    pub clients: Vec<UserFixture>,
    pub requests: Vec<RequestFixture>,
    pub comments: Vec<CommentFixture>,
    /// Requests are backdated by up to this much.
    #[serde(default = "default_request_window")]
    pub request_window: Duration,
    /// Comments are backdated by up to this much.
    #[serde(default = "default_comment_window")]
    pub comment_window: Duration,
}

fn default_request_window() -> Duration {
    Duration::days(30)
}

fn default_comment_window() -> Duration {
    Duration::days(15)
}

impl SeedFixtures {
    /// The demo dataset: one agency admin, three law-sector clients, and a
    /// handful of requests with comments.
    pub fn agency_demo() -> Self {
        Self {
            password: "123456".to_string(),
            hash_cost: 8,
            admin: UserFixture {
                id: Some("admin-1".to_string()),
                name: "Erico Samuel".to_string(),
                email: "admin@agencia.com".to_string(),
                phone: Some("(71) 99999-9999".to_string()),
                since: datetime!(2023-01-01 0:00 UTC),
            },
            clients: vec![
                UserFixture {
                    id: None,
                    name: "ESA - Escola Superior de Advocacia Orlando Gomes".to_string(),
                    email: "esa@agencia.com".to_string(),
                    phone: Some("(71) 3333-3333".to_string()),
                    since: datetime!(2023-02-15 0:00 UTC),
                },
                UserFixture {
                    id: None,
                    name: "Escritório de Advocacia Silva & Santos".to_string(),
                    email: "silva.santos@agencia.com".to_string(),
                    phone: Some("(71) 4444-4444".to_string()),
                    since: datetime!(2023-03-01 0:00 UTC),
                },
                UserFixture {
                    id: None,
                    name: "Associação dos Advogados da Bahia".to_string(),
                    email: "aab@agencia.com".to_string(),
                    phone: Some("(71) 5555-5555".to_string()),
                    since: datetime!(2023-04-10 0:00 UTC),
                },
            ],
            requests: vec![
                RequestFixture {
                    title: "Redesign do Site Institucional".to_string(),
                    description: "Necessidade de atualização do site institucional com novo layout e funcionalidades.".to_string(),
                    kind: "Website".to_string(),
                    status: RequestStatus::InProgress,
                    client: 0,
                },
                RequestFixture {
                    title: "Campanha de Marketing Digital".to_string(),
                    description: "Desenvolvimento de campanha para lançamento do novo curso de especialização.".to_string(),
                    kind: "Marketing".to_string(),
                    status: RequestStatus::Pending,
                    client: 0,
                },
                RequestFixture {
                    title: "Gestão de Redes Sociais".to_string(),
                    description: "Criação e gestão de conteúdo para redes sociais do escritório.".to_string(),
                    kind: "Social Media".to_string(),
                    status: RequestStatus::Completed,
                    client: 1,
                },
                RequestFixture {
                    title: "Identidade Visual".to_string(),
                    description: "Desenvolvimento de nova identidade visual para a associação.".to_string(),
                    kind: "Design".to_string(),
                    status: RequestStatus::Pending,
                    client: 2,
                },
            ],
            comments: vec![
                CommentFixture {
                    content: "Iniciamos o processo de redesign. Aguardando aprovação do layout inicial.".to_string(),
                    request: 0,
                    author: Author::Admin,
                },
                CommentFixture {
                    content: "Precisamos definir o público-alvo da campanha para prosseguir.".to_string(),
                    request: 1,
                    author: Author::Client(0),
                },
                CommentFixture {
                    content: "Campanha finalizada com sucesso! Alcançamos todas as metas estabelecidas.".to_string(),
                    request: 2,
                    author: Author::Admin,
                },
                CommentFixture {
                    content: "Enviando briefing detalhado para início do projeto.".to_string(),
                    request: 3,
                    author: Author::Client(2),
                },
            ],
            request_window: default_request_window(),
            comment_window: default_comment_window(),
        }
    }

    /// Parses fixtures from JSON. Windows default to 30 and 15 days.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        serde_json::from_str(json).map_err(|e| SeedError::InvalidFixture(e.to_string()))
    }

    /// Checks that every cross-reference resolves and that emails are unique.
    pub fn validate(&self) -> Result<(), SeedError> {
        if !(4..=31).contains(&self.hash_cost) {
            return Err(SeedError::InvalidFixture(format!(
                "hash cost {} outside bcrypt range 4..=31",
                self.hash_cost
            )));
        }

        if self.admin.id.as_deref().is_none_or(str::is_empty) {
            return Err(SeedError::InvalidFixture(
                "admin must have a literal id".to_string(),
            ));
        }

        if self.request_window.is_negative() || self.comment_window.is_negative() {
            return Err(SeedError::InvalidFixture(
                "backdating windows must not be negative".to_string(),
            ));
        }

        let mut emails = HashSet::new();
        for user in std::iter::once(&self.admin).chain(&self.clients) {
            if !emails.insert(user.email.to_lowercase()) {
                return Err(SeedError::InvalidFixture(format!(
                    "duplicate email {}",
                    user.email
                )));
            }
        }

        for (i, request) in self.requests.iter().enumerate() {
            if request.client >= self.clients.len() {
                return Err(SeedError::InvalidFixture(format!(
                    "request {i} references client {} but only {} exist",
                    request.client,
                    self.clients.len()
                )));
            }
        }

        for (i, comment) in self.comments.iter().enumerate() {
            if comment.request >= self.requests.len() {
                return Err(SeedError::InvalidFixture(format!(
                    "comment {i} references request {} but only {} exist",
                    comment.request,
                    self.requests.len()
                )));
            }
            match comment.author {
                Author::Client(client) if client >= self.clients.len() => {
                    return Err(SeedError::InvalidFixture(format!(
                        "comment {i} is authored by client {client} but only {} exist",
                        self.clients.len()
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

impl Default for SeedFixtures {
    fn default() -> Self {
        Self::agency_demo()
    }
}
