#[cfg(test)]
mod tests {
	use chrono::NaiveDate;
	use life_calendar::*;
	use life_expectancy::{estimate_on, Gender, Questionnaire};

	fn questionnaire() -> Questionnaire {
		Questionnaire {
			birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
			gender: Gender::Female,
			sleep_quality: 4,
			physical_activity: 3,
			nutrition: 3,
			stress_level: 4,
			smoking: 1,
			alcohol: 1,
		}
	}

	fn new_calendar(name: &str) -> CreateCalendar {
		let q = questionnaire();
		let estimation = estimate_on(&q, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
		CreateCalendar::new(q, &estimation).with_name(name)
	}

	async fn setup_db() -> LifeCalendarDb {
		let db = LifeCalendarDb::connect(&DatabaseConfig::default()).await.unwrap();
		db.initialize_schema().await.unwrap();
		db
	}

	fn event(name: &str) -> WeekEvent {
		WeekEvent::named(name)
	}

	#[tokio::test]
	async fn test_create_persists_questionnaire_and_figures() {
		let db = setup_db().await;
		let owner = OwnerId::new("alice");

		let created = db.calendars().create(&owner, new_calendar("Main")).await.unwrap();
		assert_eq!(created.name, "Main");
		assert_eq!(created.owner_id, owner);
		assert_eq!(created.questionnaire, questionnaire());
		assert_eq!(created.figures.total_weeks, 4212);
		assert_eq!(created.figures.lived_weeks, 34 * 52);

		let fetched = db.calendars().get(&owner, &created.id).await.unwrap();
		assert_eq!(fetched, created);
	}

	#[tokio::test]
	async fn test_blank_name_gets_default() {
		let db = setup_db().await;
		let owner = OwnerId::new("alice");

		let created = db.calendars().create(&owner, new_calendar("  ")).await.unwrap();
		assert_eq!(created.name, DEFAULT_CALENDAR_NAME);
	}

	#[tokio::test]
	async fn test_fourth_calendar_is_rejected_without_a_record() {
		let db = setup_db().await;
		let owner = OwnerId::new("alice");

		for name in ["one", "two", "three"] {
			db.calendars().create(&owner, new_calendar(name)).await.unwrap();
		}

		let err = db.calendars().create(&owner, new_calendar("four")).await.unwrap_err();
		assert!(matches!(err, StoreError::QuotaExceeded { limit: 3 }));
		assert_eq!(db.calendars().count(&owner).await.unwrap(), 3);

		// other owners are unaffected
		let bob = OwnerId::new("bob");
		db.calendars().create(&bob, new_calendar("bob's")).await.unwrap();
	}

	#[tokio::test]
	async fn test_quota_trigger_rejects_direct_insert() {
		let db = setup_db().await;
		let owner = OwnerId::new("alice");
		for name in ["one", "two", "three"] {
			db.calendars().create(&owner, new_calendar(name)).await.unwrap();
		}

		let err = sqlx::query(
			"INSERT INTO calendars (id, owner_id, name, birth_date, gender, sleep_quality, physical_activity, nutrition, stress_level, smoking, alcohol,
			 expected_lifespan, current_age, remaining_years, lived_weeks, remaining_weeks, total_weeks, created_at, updated_at)
			 VALUES ('x', 'alice', 'x', '1990-01-01', 'female', 3, 3, 3, 3, 1, 1, 81.0, 34, 47.0, 1768, 2444, 4212, '2024-01-01', '2024-01-01')",
		)
		.execute(db.pool())
		.await
		.unwrap_err();

		assert!(err.to_string().contains(QUOTA_EXCEEDED_MESSAGE));
		assert_eq!(db.calendars().count(&owner).await.unwrap(), 3);
	}

	#[tokio::test]
	async fn test_list_is_newest_first_and_scoped_to_owner() {
		let db = setup_db().await;
		let alice = OwnerId::new("alice");
		let bob = OwnerId::new("bob");

		db.calendars().create(&alice, new_calendar("first")).await.unwrap();
		db.calendars().create(&bob, new_calendar("not yours")).await.unwrap();
		db.calendars().create(&alice, new_calendar("second")).await.unwrap();

		let names: Vec<String> = db.calendars().list(&alice).await.unwrap().into_iter().map(|c| c.name).collect();
		assert_eq!(names, vec!["second", "first"]);
	}

	#[tokio::test]
	async fn test_foreign_calendar_is_not_found() {
		let db = setup_db().await;
		let alice = OwnerId::new("alice");
		let mallory = OwnerId::new("mallory");

		let calendar = db.calendars().create(&alice, new_calendar("Main")).await.unwrap();

		let err = db.calendars().get(&mallory, &calendar.id).await.unwrap_err();
		assert!(matches!(err, StoreError::NotFound { entity: "calendar" }));

		let err = db.calendars().delete(&mallory, &calendar.id).await.unwrap_err();
		assert!(matches!(err, StoreError::NotFound { .. }));
		assert!(db.calendars().get(&alice, &calendar.id).await.is_ok());
	}

	#[tokio::test]
	async fn test_delete_cascades_to_weeks() {
		let db = setup_db().await;
		let owner = OwnerId::new("alice");
		let calendar = db.calendars().create(&owner, new_calendar("Main")).await.unwrap();
		let keep = db.calendars().create(&owner, new_calendar("Keep")).await.unwrap();

		for index in [0, 10, 500] {
			let content = WeekContent {
				color: Some("#abc".into()),
				events: vec![event("trip")],
			};
			db.weeks().upsert_week(&calendar.id, index, content.clone()).await.unwrap();
			db.weeks().upsert_week(&keep.id, index, content).await.unwrap();
		}

		db.calendars().delete(&owner, &calendar.id).await.unwrap();

		assert!(matches!(db.calendars().get(&owner, &calendar.id).await, Err(StoreError::NotFound { .. })));
		assert!(db.weeks().list_by_calendar(&calendar.id).await.unwrap().is_empty());
		assert_eq!(db.weeks().get_week(&calendar.id, 10).await.unwrap(), WeekAnnotation::empty(10));
		assert_eq!(db.weeks().list_by_calendar(&keep.id).await.unwrap().len(), 3);
	}

	#[tokio::test]
	async fn test_failed_delete_rolls_back_weeks() {
		let db = setup_db().await;
		let owner = OwnerId::new("alice");
		let calendar = db.calendars().create(&owner, new_calendar("Main")).await.unwrap();
		db.weeks()
			.upsert_week(
				&calendar.id,
				3,
				WeekContent {
					color: None,
					events: vec![event("first day at school")],
				},
			)
			.await
			.unwrap();

		// Fail the calendar row delete after the weeks are already gone.
		sqlx::query("CREATE TRIGGER block_calendar_delete BEFORE DELETE ON calendars BEGIN SELECT RAISE(ABORT, 'boom'); END")
			.execute(db.pool())
			.await
			.unwrap();

		let err = db.calendars().delete(&owner, &calendar.id).await.unwrap_err();
		assert!(matches!(err, StoreError::ConflictDuringCascade(_)));

		assert!(db.calendars().get(&owner, &calendar.id).await.is_ok());
		let week = db.weeks().get_week(&calendar.id, 3).await.unwrap();
		assert_eq!(week.events, vec![event("first day at school")]);
	}

	#[tokio::test]
	async fn test_file_database_survives_reopen() {
		let dir = tempfile::tempdir().unwrap();
		let url = format!("sqlite://{}", dir.path().join("calendar.db").display());
		let owner = OwnerId::new("alice");

		let db = LifeCalendarDb::connect(&DatabaseConfig::new(url.clone())).await.unwrap();
		db.initialize_schema().await.unwrap();
		let calendar = db.calendars().create(&owner, new_calendar("Main")).await.unwrap();
		db.weeks().append_events(&calendar.id, 7, Some("#00ff00".into()), vec![event("holiday")]).await.unwrap();
		db.close().await;

		let reopened = LifeCalendarDb::connect(&DatabaseConfig::new(url)).await.unwrap();
		reopened.initialize_schema().await.unwrap();
		let listed = reopened.calendars().list(&owner).await.unwrap();
		assert_eq!(listed.len(), 1);
		assert_eq!(listed[0].id, calendar.id);
		assert_eq!(reopened.weeks().get_week(&calendar.id, 7).await.unwrap().color.as_deref(), Some("#00ff00"));
	}
}
