//! Shared helpers for the PostgreSQL adapter suites.
//!
//! Each suite provisions its own database cloned from a migrated template on
//! a shared embedded cluster, so tests never observe each other's rows.

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod pg_embed;

use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};
use rsboard::domain::{EventId, RankedEvent, User, UserId, UserProfile, UserProfileDraft};
use rsboard::outbound::persistence::{DbPool, PoolConfig};
use tokio::runtime::Runtime;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::provision_template_database;
pub use pg_embed::shared_cluster;

/// Render a `postgres` error with its SQLSTATE and detail when present.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Fresh board database with a runtime to drive the async adapters.
pub struct BoardDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub url: String,
    _database: TemporaryDatabase,
}

/// Provision a migrated database and a small pool against it.
pub fn board_database(max_size: u32) -> Result<BoardDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_template_database(cluster)?;
    let url = database.url().to_string();

    let config = PoolConfig::new(&url)
        .with_max_size(max_size)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(BoardDatabase {
        runtime,
        pool,
        url,
        _database: database,
    })
}

/// Row count of `table`, read over a blocking connection.
///
/// Call outside `Runtime::block_on`; the `postgres` client drives its own
/// runtime.
pub fn count_rows(url: &str, table: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(format!("SELECT COUNT(*) FROM {table}").as_str(), &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

pub fn voter(name: &str, vote_budget: u32) -> User {
    let profile = UserProfile::new(UserProfileDraft {
        name: name.to_owned(),
        gender: "female".to_owned(),
        age: 30,
        email: format!("{name}@example.com"),
        phone: "18888888888".to_owned(),
    })
    .expect("fixture profile is valid");
    User::new(UserId::random(), profile, vote_budget)
}

pub fn nominated(id: EventId, name: &str, owner: &User) -> RankedEvent {
    RankedEvent::nominate(id, name, "misc", owner.id()).expect("fixture event is valid")
}

/// Whole-second timestamps survive the microsecond column precision.
pub fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, second)
        .single()
        .expect("fixture timestamp is valid")
}
