#[cfg(test)]
mod tests {
	use chrono::NaiveDate;
	use life_calendar::*;
	use life_expectancy::{estimate_on, Gender, Questionnaire};
	use tempfile::TempDir;

	/// File-backed database with a real multi-connection pool. The directory
	/// must outlive the database.
	async fn file_db() -> (TempDir, LifeCalendarDb) {
		let dir = tempfile::tempdir().unwrap();
		let url = format!("sqlite://{}", dir.path().join("calendar.db").display());
		let config = DatabaseConfig {
			max_connections: Some(5),
			..DatabaseConfig::new(url)
		};
		let db = LifeCalendarDb::connect(&config).await.unwrap();
		db.initialize_schema().await.unwrap();
		(dir, db)
	}

	fn new_calendar() -> CreateCalendar {
		let questionnaire = Questionnaire {
			birth_date: NaiveDate::from_ymd_opt(1992, 11, 3).unwrap(),
			gender: Gender::Female,
			sleep_quality: 4,
			physical_activity: 3,
			nutrition: 3,
			stress_level: 4,
			smoking: 1,
			alcohol: 1,
		};
		let estimation = estimate_on(&questionnaire, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
		CreateCalendar::new(questionnaire, &estimation)
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
	async fn test_concurrent_creates_for_distinct_owners_all_succeed() {
		let (_dir, db) = file_db().await;

		let handles: Vec<_> = (0..40)
			.map(|i| {
				let db = db.clone();
				tokio::spawn(async move { db.calendars().create(&OwnerId::new(format!("owner-{i}")), new_calendar()).await })
			})
			.collect();

		for handle in handles {
			handle.await.unwrap().unwrap();
		}

		let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM calendars").fetch_one(db.pool()).await.unwrap();
		assert_eq!(total, 40);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
	async fn test_concurrent_creates_for_one_owner_stop_at_quota() {
		let (_dir, db) = file_db().await;
		let owner = OwnerId::new("racer");

		let handles: Vec<_> = (0..10)
			.map(|_| {
				let db = db.clone();
				let owner = owner.clone();
				tokio::spawn(async move { db.calendars().create(&owner, new_calendar()).await })
			})
			.collect();

		let mut created = 0;
		let mut rejected = 0;
		for handle in handles {
			match handle.await.unwrap() {
				Ok(_) => created += 1,
				Err(StoreError::QuotaExceeded { limit: 3 }) => rejected += 1,
				Err(other) => panic!("unexpected error: {other}"),
			}
		}

		assert_eq!(created, 3);
		assert_eq!(rejected, 7);
		assert_eq!(db.calendars().count(&owner).await.unwrap(), 3);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
	async fn test_concurrent_upserts_keep_one_row() {
		let (_dir, db) = file_db().await;
		let calendar = db.calendars().create(&OwnerId::new("owner"), new_calendar()).await.unwrap();

		let handles: Vec<_> = (0..40)
			.map(|i| {
				let db = db.clone();
				let id = calendar.id.clone();
				let content = WeekContent {
					color: Some("#336699".into()),
					events: vec![WeekEvent::named(format!("writer {i}"))],
				};
				tokio::spawn(async move { db.weeks().upsert_week(&id, 200, content).await })
			})
			.collect();

		for handle in handles {
			handle.await.unwrap().unwrap();
		}

		let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM week_annotations").fetch_one(db.pool()).await.unwrap();
		assert_eq!(rows, 1);
		assert_eq!(db.weeks().get_week(&calendar.id, 200).await.unwrap().events.len(), 1);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
	async fn test_concurrent_appends_keep_every_event() {
		let (_dir, db) = file_db().await;
		let calendar = db.calendars().create(&OwnerId::new("owner"), new_calendar()).await.unwrap();

		let handles: Vec<_> = (0..40)
			.map(|i| {
				let db = db.clone();
				let id = calendar.id.clone();
				tokio::spawn(async move { db.weeks().append_events(&id, 12, None, vec![WeekEvent::named(format!("event {i}"))]).await })
			})
			.collect();

		for handle in handles {
			handle.await.unwrap().unwrap();
		}

		assert_eq!(db.weeks().get_week(&calendar.id, 12).await.unwrap().events.len(), 40);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
	async fn test_concurrent_deletes_report_not_found_once() {
		let (_dir, db) = file_db().await;
		let owner = OwnerId::new("owner");
		let calendar = db.calendars().create(&owner, new_calendar()).await.unwrap();
		db.weeks().append_events(&calendar.id, 1, None, vec![WeekEvent::named("first steps")]).await.unwrap();

		let handles: Vec<_> = (0..8)
			.map(|_| {
				let db = db.clone();
				let owner = owner.clone();
				let id = calendar.id.clone();
				tokio::spawn(async move { db.calendars().delete(&owner, &id).await })
			})
			.collect();

		let mut deleted = 0;
		for handle in handles {
			match handle.await.unwrap() {
				Ok(()) => deleted += 1,
				Err(StoreError::NotFound { entity: "calendar" }) => {}
				Err(other) => panic!("unexpected error: {other}"),
			}
		}

		assert_eq!(deleted, 1);
		assert!(db.weeks().list_by_calendar(&calendar.id).await.unwrap().is_empty());
	}
}
