//! Fluent builder for a complete seed run.

use std::time::Instant;

use agency::models::{Comment, Request, User};
use rand::Rng;
use time::OffsetDateTime;
use tracing::info;

use crate::config::{Author, SeedFixtures};
use crate::db::{PurgeCounts, SeedError, SeedStore, Seeder};
use crate::generators::backdate_batch;

/// Everything one seed run wrote.
#[derive(Debug)]
pub struct SeedReport {
    pub admin: User,
    pub clients: Vec<User>,
    pub requests: Vec<Request>,
    pub comments: Vec<Comment>,
    /// Reference instant for the backdated `created_at` values.
    pub seeded_at: OffsetDateTime,
    pub purged: PurgeCounts,
    /// Wall time of the whole run (milliseconds).
    pub elapsed_ms: u64,
}

impl SeedReport {
    /// Logs the run summary.
    pub fn log_summary(&self) {
        info!("Seed completed!");
        info!("  Admin: {}", self.admin.email);
        info!("  Clients: {}", self.clients.len());
        info!("  Requests: {}", self.requests.len());
        info!("  Comments: {}", self.comments.len());
        info!("  Took {} ms", self.elapsed_ms);
    }
}

/// Describes a seed run: which fixtures, and which "now" to backdate from.
///
/// # Example
///
/// ```rust,ignore
/// let report = SeedPlan::agency_demo()
///     .build_and_release(Seeder::new(db), &mut rng)
///     .await?;
/// ```
pub struct SeedPlan {
    fixtures: SeedFixtures,
    now: Option<OffsetDateTime>,
}

impl SeedPlan {
    pub fn new(fixtures: SeedFixtures) -> Self {
        Self { fixtures, now: None }
    }

    /// Plan for the built-in demo dataset.
    pub fn agency_demo() -> Self {
        Self::new(SeedFixtures::agency_demo())
    }

    /// Pins the reference instant instead of reading the clock once the
    /// user phases have finished.
    pub fn at(mut self, now: OffsetDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Purges the store and writes every fixture, phase by phase.
    ///
    /// Phases run in order: purge, admin, clients, requests, comments. Nothing
    /// is rolled back on failure; rerunning starts with a purge.
    pub async fn build<S: SeedStore>(
        &self,
        seeder: &Seeder<S>,
        rng: &mut impl Rng,
    ) -> Result<SeedReport, SeedError> {
        let start = Instant::now();
        let fixtures = &self.fixtures;
        fixtures.validate()?;

        let purged = seeder.clear_all().await?;

        let admin = seeder
            .seed_admin(&fixtures.admin, &fixtures.password, fixtures.hash_cost)
            .await?;

        let clients = seeder
            .seed_clients(&fixtures.clients, &fixtures.password, fixtures.hash_cost)
            .await?;

        // Windows are measured from when the dependent rows are written
        let seeded_at = self.now.unwrap_or_else(OffsetDateTime::now_utc);

        let request_times = backdate_batch(
            fixtures.requests.len(),
            seeded_at,
            fixtures.request_window,
            rng,
        );
        let new_requests = fixtures
            .requests
            .iter()
            .zip(request_times)
            .map(|(r, created_at)| {
                Request::new(
                    r.title.clone(),
                    r.description.clone(),
                    r.kind.clone(),
                    r.status,
                    clients[r.client].id.clone(),
                    created_at,
                )
            })
            .collect();
        let requests = seeder.seed_requests(new_requests).await?;

        let comment_times = backdate_batch(
            fixtures.comments.len(),
            seeded_at,
            fixtures.comment_window,
            rng,
        );
        let new_comments = fixtures
            .comments
            .iter()
            .zip(comment_times)
            .map(|(c, created_at)| {
                let author = match c.author {
                    Author::Admin => &admin,
                    Author::Client(i) => &clients[i],
                };
                Comment::new(
                    c.content.clone(),
                    requests[c.request].id,
                    author.id.clone(),
                    created_at,
                )
            })
            .collect();
        let comments = seeder.seed_comments(new_comments).await?;

        Ok(SeedReport {
            admin,
            clients,
            requests,
            comments,
            seeded_at,
            purged,
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Runs [`SeedPlan::build`] and then closes the store, whether or not the
    /// run succeeded.
    pub async fn build_and_release<S: SeedStore>(
        &self,
        seeder: Seeder<S>,
        rng: &mut impl Rng,
    ) -> Result<SeedReport, SeedError> {
        let result = self.build(&seeder, rng).await;
        seeder.close().await;
        result
    }
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self::agency_demo()
    }
}
