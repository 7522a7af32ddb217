use speculate2::speculate;

speculate! {
    use ideaforge_core::db::Database;
    use ideaforge_core::models::*;
    use serde_json::json;

    fn setup_db() -> Database {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");
        db
    }

    fn create_test_idea(db: &Database, summary: &str) -> Idea {
        db.create_idea(CreateIdeaInput {
            summary: summary.to_string(),
            description: format!("{} description", summary),
            bullet_points: vec![],
            status: None,
            company_name: None,
        })
        .expect("Failed to insert idea")
    }

    fn object(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    describe "schema" {
        it "can be migrated more than once" {
            let db = setup_db();
            db.migrate().unwrap();
            assert!(db.list_ideas().unwrap().is_empty());
        }

        it "persists to a file across reopen" {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("ideas.db");

            let db = Database::open(&path).unwrap();
            db.migrate().unwrap();
            let idea = create_test_idea(&db, "Persisted");
            drop(db);

            let reopened = Database::open(&path).unwrap();
            reopened.migrate().unwrap();
            let found = reopened.get_idea(idea.id).unwrap();
            assert_eq!(found, Some(idea));
        }
    }

    describe "ideas" {
        it "applies defaults on create" {
            let db = setup_db();
            let idea = create_test_idea(&db, "S");

            assert_eq!(idea.id, 1);
            assert_eq!(idea.summary, "S");
            assert!(idea.bullet_points.is_empty());
            assert_eq!(idea.status, IdeaStatus::Draft);
            assert_eq!(idea.company_name, None);
            assert!(idea.is_active);
            assert_eq!(idea.created_at, idea.updated_at);
        }

        it "round-trips bullet points in order" {
            let db = setup_db();
            let created = db.create_idea(CreateIdeaInput {
                summary: "Bullets".into(),
                description: "D".into(),
                bullet_points: vec!["a".into(), "b".into()],
                status: Some(IdeaStatus::Other("exploring".into())),
                company_name: Some("Acme".into()),
            }).unwrap();

            let fetched = db.get_idea(created.id).unwrap().unwrap();
            assert_eq!(fetched.bullet_points, vec!["a", "b"]);
            assert_eq!(fetched.status, IdeaStatus::Other("exploring".into()));
            assert_eq!(fetched, created);
        }

        it "lists only active ideas newest first" {
            let db = setup_db();
            let first = create_test_idea(&db, "first");
            let second = create_test_idea(&db, "second");
            let hidden = create_test_idea(&db, "hidden");

            db.update_idea(hidden.id, UpdateIdeaInput {
                summary: hidden.summary.clone(),
                description: hidden.description.clone(),
                bullet_points: vec![],
                status: None,
                company_name: None,
                is_active: Some(false),
            }).unwrap();

            let ids: Vec<i64> = db.list_ideas().unwrap().iter().map(|i| i.id).collect();
            assert_eq!(ids, vec![second.id, first.id]);

            let direct = db.get_idea(hidden.id).unwrap().unwrap();
            assert!(!direct.is_active);
        }

        it "keeps status and activity when an update omits them" {
            let db = setup_db();
            let idea = create_test_idea(&db, "keep");
            db.create_validation(CreateValidationInput {
                idea_id: idea.id,
                validation_data: JsonObject::new(),
                score: None,
            }).unwrap();

            let updated = db.update_idea(idea.id, UpdateIdeaInput {
                summary: "renamed".into(),
                description: "D2".into(),
                bullet_points: vec!["x".into()],
                status: None,
                company_name: Some("Co".into()),
                is_active: None,
            }).unwrap().unwrap();

            assert_eq!(updated.summary, "renamed");
            assert_eq!(updated.bullet_points, vec!["x"]);
            assert_eq!(updated.status, IdeaStatus::Validated);
            assert!(updated.is_active);
        }

        it "allows an inactive idea to stay validated" {
            let db = setup_db();
            let idea = create_test_idea(&db, "independent");
            let updated = db.update_idea(idea.id, UpdateIdeaInput {
                summary: idea.summary.clone(),
                description: idea.description.clone(),
                bullet_points: vec![],
                status: Some(IdeaStatus::Validated),
                company_name: None,
                is_active: Some(false),
            }).unwrap().unwrap();

            assert_eq!(updated.status, IdeaStatus::Validated);
            assert!(!updated.is_active);
        }

        it "reports missing ideas" {
            let db = setup_db();
            assert!(db.get_idea(999).unwrap().is_none());
            assert!(!db.delete_idea(999).unwrap());
            let update = db.update_idea(999, UpdateIdeaInput {
                summary: "S".into(),
                description: "D".into(),
                bullet_points: vec![],
                status: None,
                company_name: None,
                is_active: None,
            }).unwrap();
            assert!(update.is_none());
        }

        it "decodes malformed bullet points as empty" {
            let db = setup_db();
            let idea = create_test_idea(&db, "broken");
            db.with_connection(|conn| {
                conn.execute(
                    "UPDATE ideas SET bullet_points = 'not json' WHERE id = ?1",
                    [idea.id],
                )?;
                Ok(())
            }).unwrap();

            let fetched = db.get_idea(idea.id).unwrap().unwrap();
            assert!(fetched.bullet_points.is_empty());
        }
    }

    describe "status side effects" {
        it "marks the idea validated when a validation is created" {
            let db = setup_db();
            let idea = create_test_idea(&db, "validate me");

            let validation = db.create_validation(CreateValidationInput {
                idea_id: idea.id,
                validation_data: object(json!({"foo": 1})),
                score: Some(72),
            }).unwrap().unwrap();

            assert_eq!(validation.idea_id, idea.id);
            assert_eq!(validation.score, Some(72));
            let after = db.get_idea(idea.id).unwrap().unwrap();
            assert_eq!(after.status, IdeaStatus::Validated);
            assert!(after.updated_at >= idea.updated_at);
        }

        it "moves the idea into planning when a business plan is created" {
            let db = setup_db();
            let idea = create_test_idea(&db, "plan me");

            let plan = db.create_business_plan(CreateBusinessPlanInput {
                idea_id: idea.id,
                template_id: Some("lean-canvas".into()),
                sections: object(json!({"problem": "too slow"})),
                tasks: vec![json!({"title": "interview users", "done": false})],
            }).unwrap().unwrap();

            assert_eq!(plan.template_id.as_deref(), Some("lean-canvas"));
            assert_eq!(plan.tasks.len(), 1);
            let after = db.get_idea(idea.id).unwrap().unwrap();
            assert_eq!(after.status, IdeaStatus::Planning);
        }

        it "leaves status alone when implementation items are added" {
            let db = setup_db();
            let idea = create_test_idea(&db, "build me");

            db.create_implementation_item(CreateImplementationItemInput {
                idea_id: idea.id,
                item_type: "milestone".into(),
                name: "MVP".into(),
                owner: None,
                start_date: None,
                end_date: None,
                completion_percentage: None,
                status: None,
            }).unwrap().unwrap();

            let after = db.get_idea(idea.id).unwrap().unwrap();
            assert_eq!(after.status, IdeaStatus::Draft);
        }

        it "writes nothing for an unknown idea" {
            let db = setup_db();

            let validation = db.create_validation(CreateValidationInput {
                idea_id: 42,
                validation_data: JsonObject::new(),
                score: None,
            }).unwrap();
            let plan = db.create_business_plan(CreateBusinessPlanInput {
                idea_id: 42,
                template_id: None,
                sections: JsonObject::new(),
                tasks: vec![],
            }).unwrap();

            assert!(validation.is_none());
            assert!(plan.is_none());
            let count: i64 = db.with_connection(|conn| {
                Ok(conn.query_row(
                    "SELECT (SELECT COUNT(*) FROM validations) + (SELECT COUNT(*) FROM business_plans)",
                    [],
                    |row| row.get(0),
                )?)
            }).unwrap();
            assert_eq!(count, 0);
        }

        it "rolls back the child row when the unit of work fails" {
            let db = setup_db();
            let idea = create_test_idea(&db, "atomic");

            let result: anyhow::Result<()> = db.with_transaction(|tx| {
                tx.execute(
                    "INSERT INTO validations (idea_id, validation_data, created_at) VALUES (?1, '{}', 'now')",
                    [idea.id],
                )?;
                anyhow::bail!("status update failed");
            });

            assert!(result.is_err());
            assert!(db.get_latest_validation(idea.id).unwrap().is_none());
        }
    }

    describe "validations" {
        it "returns the most recent validation for an idea" {
            let db = setup_db();
            let idea = create_test_idea(&db, "scored");
            for score in [10, 20, 30] {
                db.create_validation(CreateValidationInput {
                    idea_id: idea.id,
                    validation_data: JsonObject::new(),
                    score: Some(score),
                }).unwrap();
            }

            let latest = db.get_latest_validation(idea.id).unwrap().unwrap();
            assert_eq!(latest.score, Some(30));
        }

        it "replaces data and score on update" {
            let db = setup_db();
            let idea = create_test_idea(&db, "rescore");
            let validation = db.create_validation(CreateValidationInput {
                idea_id: idea.id,
                validation_data: object(json!({"old": true})),
                score: Some(1),
            }).unwrap().unwrap();

            let updated = db.update_validation(validation.id, UpdateValidationInput {
                validation_data: object(json!({"foo": 1})),
                score: Some(80),
            }).unwrap().unwrap();

            assert_eq!(updated.validation_data, object(json!({"foo": 1})));
            assert_eq!(updated.score, Some(80));
            assert!(db.update_validation(999, UpdateValidationInput {
                validation_data: JsonObject::new(),
                score: None,
            }).unwrap().is_none());
        }
    }

    describe "implementation items" {
        it "applies defaults and lists items in creation order" {
            let db = setup_db();
            let idea = create_test_idea(&db, "tracked");
            for name in ["design", "build"] {
                db.create_implementation_item(CreateImplementationItemInput {
                    idea_id: idea.id,
                    item_type: "task".into(),
                    name: name.into(),
                    owner: Some("sam".into()),
                    start_date: Some("2024-01-01".into()),
                    end_date: None,
                    completion_percentage: None,
                    status: None,
                }).unwrap();
            }

            let items = db.list_implementation_items(idea.id).unwrap();
            let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, vec!["design", "build"]);
            assert_eq!(items[0].completion_percentage, 0);
            assert_eq!(items[0].status, ItemStatus::NotStarted);
            assert!(db.list_implementation_items(999).unwrap().is_empty());
        }

        it "updates progress and status" {
            let db = setup_db();
            let idea = create_test_idea(&db, "progress");
            let item = db.create_implementation_item(CreateImplementationItemInput {
                idea_id: idea.id,
                item_type: "task".into(),
                name: "launch".into(),
                owner: None,
                start_date: None,
                end_date: None,
                completion_percentage: Some(10),
                status: Some(ItemStatus::InProgress),
            }).unwrap().unwrap();

            let updated = db.update_implementation_item(item.id, UpdateImplementationItemInput {
                item_type: "task".into(),
                name: "launch".into(),
                owner: Some("kim".into()),
                start_date: None,
                end_date: Some("2024-06-30".into()),
                completion_percentage: Some(100),
                status: Some(ItemStatus::Completed),
            }).unwrap().unwrap();

            assert_eq!(updated.completion_percentage, 100);
            assert_eq!(updated.status, ItemStatus::Completed);
            assert_eq!(updated.owner.as_deref(), Some("kim"));
        }
    }

    describe "cascade" {
        it "removes every child record with the idea" {
            let db = setup_db();
            let idea = create_test_idea(&db, "doomed");
            let validation = db.create_validation(CreateValidationInput {
                idea_id: idea.id,
                validation_data: JsonObject::new(),
                score: Some(5),
            }).unwrap().unwrap();
            let plan = db.create_business_plan(CreateBusinessPlanInput {
                idea_id: idea.id,
                template_id: None,
                sections: JsonObject::new(),
                tasks: vec![],
            }).unwrap().unwrap();
            let item = db.create_implementation_item(CreateImplementationItemInput {
                idea_id: idea.id,
                item_type: "task".into(),
                name: "never".into(),
                owner: None,
                start_date: None,
                end_date: None,
                completion_percentage: None,
                status: None,
            }).unwrap().unwrap();

            assert!(db.delete_idea(idea.id).unwrap());

            assert!(db.get_validation(validation.id).unwrap().is_none());
            assert!(db.get_business_plan(plan.id).unwrap().is_none());
            assert!(db.get_implementation_item(item.id).unwrap().is_none());
        }
    }

    describe "overview" {
        it "collects the latest children of an idea" {
            let db = setup_db();
            let idea = create_test_idea(&db, "whole picture");
            db.create_validation(CreateValidationInput {
                idea_id: idea.id,
                validation_data: JsonObject::new(),
                score: Some(64),
            }).unwrap();

            let overview = db.get_idea_overview(idea.id).unwrap().unwrap();
            assert_eq!(overview.idea.status, IdeaStatus::Validated);
            assert_eq!(overview.validation.map(|v| v.score), Some(Some(64)));
            assert!(overview.business_plan.is_none());
            assert!(overview.implementation_items.is_empty());
            assert!(db.get_idea_overview(999).unwrap().is_none());
        }
    }
}
