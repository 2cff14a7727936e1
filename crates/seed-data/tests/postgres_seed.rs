//! Integration tests for seeding a real PostgreSQL database.
//!
//! To run these tests, you need:
//! 1. A PostgreSQL database the tests may wipe
//! 2. DATABASE_URL environment variable set
//!
//! Run with: `DATABASE_URL=postgres://... cargo nextest run -p seed-data postgres`
//!
//! Note: seeding purges the users, requests, and comments tables. Do not point
//! these tests at a database whose data you need.

use std::collections::HashSet;
use std::env;

use agency::auth::verify_password;
use agency::database::Database;
use agency::errors::AppError;
use agency::models::Role;
use rand::SeedableRng;
use rand::rngs::StdRng;
use seed_data::prelude::*;
use time::Duration;
use tokio::sync::Mutex;

// Every test purges the same tables.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// Connect and migrate, skipping tests if DATABASE_URL is not set.
async fn get_test_db() -> Option<Database> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let db = match Database::connect(&database_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    db.migrate().await.expect("Failed to run migrations");
    Some(db)
}

#[tokio::test]
async fn test_postgres_seed_twice_same_counts() {
    let _guard = DB_LOCK.lock().await;
    let Some(db) = get_test_db().await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(12345);

    for _ in 0..2 {
        let report = SeedPlan::agency_demo()
            .build(&Seeder::new(db.clone()), &mut rng)
            .await
            .expect("seed run failed");
        assert_eq!(report.clients.len(), 3);

        assert_eq!(db.count_users_by_role(Role::Admin).await.unwrap(), 1);
        assert_eq!(db.count_users_by_role(Role::Client).await.unwrap(), 3);
        assert_eq!(db.get_requests().await.unwrap().len(), 4);
        assert_eq!(db.get_comments().await.unwrap().len(), 4);
    }

    db.close().await;
}

#[tokio::test]
async fn test_postgres_seeded_rows() {
    let _guard = DB_LOCK.lock().await;
    let Some(db) = get_test_db().await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(7);

    let report = SeedPlan::agency_demo()
        .build(&Seeder::new(db.clone()), &mut rng)
        .await
        .expect("seed run failed");
    let now = report.seeded_at;

    let admin = db.get_user("admin-1").await.unwrap().expect("admin exists");
    assert_eq!(admin.email, "admin@agencia.com");
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.phone.as_deref(), Some("(71) 99999-9999"));

    let users = db.get_users().await.unwrap();
    let client_ids: HashSet<_> = users
        .iter()
        .filter(|u| u.role == Role::Client)
        .map(|u| u.id.clone())
        .collect();
    let user_ids: HashSet<_> = users.iter().map(|u| u.id.clone()).collect();

    for user in &users {
        assert_ne!(user.password, "123456");
        assert!(user.password.starts_with("$2b$08$"));
        assert!(verify_password("123456", &user.password).unwrap());
    }

    // Postgres truncates to microseconds, so the lower bound gets slack
    let requests = db.get_requests().await.unwrap();
    let request_ids: HashSet<_> = requests.iter().map(|r| r.id).collect();
    for request in &requests {
        assert!(client_ids.contains(&request.client_id));
        assert!(request.created_at <= now);
        assert!(request.created_at >= now - Duration::days(30) - Duration::milliseconds(1));
    }

    for comment in db.get_comments().await.unwrap() {
        assert!(request_ids.contains(&comment.request_id));
        assert!(user_ids.contains(&comment.user_id));
        assert!(comment.created_at <= now);
        assert!(comment.created_at >= now - Duration::days(15) - Duration::milliseconds(1));
    }

    db.close().await;
}

#[tokio::test]
async fn test_postgres_duplicate_email_is_conflict() {
    let _guard = DB_LOCK.lock().await;
    let Some(db) = get_test_db().await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(3);

    let report = SeedPlan::agency_demo()
        .build(&Seeder::new(db.clone()), &mut rng)
        .await
        .expect("seed run failed");

    let mut duplicate = report.clients[0].clone();
    duplicate.id = "duplicate-client".to_string();

    let err = db.insert_user(&duplicate).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    db.close().await;
}

#[tokio::test]
async fn test_postgres_release_closes_pool() {
    let _guard = DB_LOCK.lock().await;
    let Some(db) = get_test_db().await else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(4);

    SeedPlan::agency_demo()
        .build_and_release(Seeder::new(db.clone()), &mut rng)
        .await
        .expect("seed run failed");

    assert!(db.pool().is_closed());
}
