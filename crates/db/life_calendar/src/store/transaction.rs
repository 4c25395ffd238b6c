use sqlx::pool::PoolConnection;
use sqlx::{Error, Sqlite, SqliteConnection, SqlitePool};
use std::ops::{Deref, DerefMut};
use tracing::warn;

const LIVE: &str = "connection is held until commit or drop";

/// A write transaction that takes SQLite's RESERVED lock when it begins.
///
/// A deferred transaction that reads before it writes cannot wait for the
/// write lock, so concurrent writers fail with `SQLITE_BUSY` instead of
/// queueing on the busy timeout. Beginning `IMMEDIATE` makes the wait
/// happen up front, where the busy timeout applies.
///
/// Dropped without `commit`, the connection is detached from the pool and
/// closed, which rolls the open transaction back.
pub struct ImmediateTransaction {
	conn: Option<PoolConnection<Sqlite>>,
}

impl ImmediateTransaction {
	pub async fn begin(pool: &SqlitePool) -> Result<Self, Error> {
		let mut conn = pool.acquire().await?;
		sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
		Ok(Self { conn: Some(conn) })
	}

	/// Commits when `outcome` is `Ok`, rolls back otherwise, and passes the
	/// outcome through.
	pub async fn finish<T, E>(self, outcome: Result<T, E>) -> Result<T, E>
	where
		E: From<Error>,
	{
		match outcome {
			Ok(value) => {
				self.commit().await?;
				Ok(value)
			}
			Err(err) => {
				self.rollback().await;
				Err(err)
			}
		}
	}

	pub async fn commit(self) -> Result<(), Error> {
		self.end("COMMIT").await
	}

	pub async fn rollback(self) {
		if let Err(err) = self.end("ROLLBACK").await {
			warn!(%err, "rollback failed");
		}
	}

	async fn end(mut self, statement: &'static str) -> Result<(), Error> {
		let Some(mut conn) = self.conn.take() else {
			return Ok(());
		};
		if let Err(err) = sqlx::query(statement).execute(&mut *conn).await {
			// The transaction may still be open; never hand it back to the pool.
			discard(conn);
			return Err(err);
		}
		Ok(())
	}
}

fn discard(conn: PoolConnection<Sqlite>) {
	warn!("discarding connection with an open transaction");
	drop(conn.detach());
}

impl Deref for ImmediateTransaction {
	type Target = SqliteConnection;

	#[allow(clippy::expect_used)]
	fn deref(&self) -> &Self::Target {
		self.conn.as_deref().expect(LIVE)
	}
}

impl DerefMut for ImmediateTransaction {
	#[allow(clippy::expect_used)]
	fn deref_mut(&mut self) -> &mut Self::Target {
		self.conn.as_deref_mut().expect(LIVE)
	}
}

impl Drop for ImmediateTransaction {
	fn drop(&mut self) {
		if let Some(conn) = self.conn.take() {
			discard(conn);
		}
	}
}
