// tests/profile_tests.rs

use reqwest::{StatusCode, header, redirect::Policy};
use sqlx::SqlitePool;
use typeforge::{
    config::Config,
    db::{self, SqliteStore, UserRepository},
    routes,
    state::AppState,
};

async fn spawn_app() -> (String, SqlitePool) {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");

    db::migrate(&pool).await.expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        secret_key: "profile_test_secret".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        session_ttl_secs: 600,
        remember_ttl_secs: 3600,
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
    };

    let app = routes::create_router(AppState::new(pool.clone(), config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

/// A logged-in test user.
struct TestUser {
    client: reqwest::Client,
    address: String,
    cookie: String,
}

impl TestUser {
    async fn sign_up(address: &str, username: &str, email: &str) -> Self {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap();

        client
            .post(format!("{}/register", address))
            .form(&[
                ("username", username),
                ("email", email),
                ("password", "pw1"),
                ("confirm_password", "pw1"),
            ])
            .send()
            .await
            .expect("Register failed");

        let login = client
            .post(format!("{}/login", address))
            .form(&[("email", email), ("password", "pw1")])
            .send()
            .await
            .expect("Login failed");
        assert_eq!(login.status(), StatusCode::SEE_OTHER);

        let cookie = login.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        Self {
            client,
            address: address.to_string(),
            cookie,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .header(header::COOKIE, &self.cookie)
            .send()
            .await
            .unwrap()
    }

    async fn save_result(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/save_result", self.address))
            .header(header::COOKIE, &self.cookie)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn profile(&self) -> serde_json::Value {
        let response = self.get("/profile").await;
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.unwrap()
    }
}

async fn seed_text(pool: &SqlitePool, title: &str, content: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO text (title, content) VALUES (?, ?) RETURNING id")
        .bind(title)
        .bind(content)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn end_to_end_profile_flow() {
    let (address, pool) = spawn_app().await;

    // Admin creates the text through the admin route
    let admin = TestUser::sign_up(&address, "adminka", "admin@x.com").await;
    SqliteStore::new(pool.clone())
        .grant_admin("adminka")
        .await
        .unwrap()
        .expect("admin exists");
    let created = admin
        .client
        .post(format!("{}/text/new", address))
        .header(header::COOKIE, &admin.cookie)
        .form(&[("title", "Sample"), ("content", "the quick fox")])
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::SEE_OTHER);

    let alice = TestUser::sign_up(&address, "alice", "a@x.com").await;

    let test_page: serde_json::Value = alice.get("/test/1").await.json().await.unwrap();
    assert_eq!(test_page["text"]["content"], "the quick fox");

    let response = alice
        .save_result(serde_json::json!({"text_id": 1, "wpm": 55, "accuracy": 97.2, "errors": 3}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"status": "success"}));

    let profile = alice.profile().await;
    assert_eq!(profile["stats"]["avg_wpm"], 55.0);
    assert_eq!(profile["stats"]["best_wpm"], 55);
    assert_eq!(profile["stats"]["total_tests"], 1);
    assert_eq!(profile["results"][0]["wpm"], 55);
    assert_eq!(profile["results"][0]["accuracy"], 97.2);
    assert_eq!(profile["results"][0]["errors_count"], 3);
    assert_eq!(profile["results"][0]["text_title"], "Sample");
}

#[tokio::test]
async fn empty_profile_has_no_average() {
    let (address, _pool) = spawn_app().await;
    let alice = TestUser::sign_up(&address, "alice", "a@x.com").await;

    let profile = alice.profile().await;

    assert_eq!(profile["stats"]["total_tests"], 0);
    assert!(profile["stats"]["avg_wpm"].is_null());
    assert!(profile["stats"]["best_wpm"].is_null());
    assert_eq!(profile["results"], serde_json::json!([]));
}

#[tokio::test]
async fn stats_aggregate_only_own_results() {
    let (address, pool) = spawn_app().await;
    let text_id = seed_text(&pool, "Sample", "the quick fox").await;

    let alice = TestUser::sign_up(&address, "alice", "a@x.com").await;
    let bob = TestUser::sign_up(&address, "bob", "b@x.com").await;

    for wpm in [10, 20, 30] {
        alice
            .save_result(serde_json::json!({"text_id": text_id, "wpm": wpm, "accuracy": 90, "errors": 1}))
            .await;
    }
    bob.save_result(serde_json::json!({"text_id": text_id, "wpm": 100, "accuracy": 99.0, "errors": 0}))
        .await;

    let profile = alice.profile().await;
    assert_eq!(profile["stats"]["avg_wpm"], 20.0);
    assert_eq!(profile["stats"]["best_wpm"], 30);
    assert_eq!(profile["stats"]["total_tests"], 3);

    let wpms: Vec<i64> = profile["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["wpm"].as_i64().unwrap())
        .collect();
    assert_eq!(wpms, vec![10, 20, 30]);
}

#[tokio::test]
async fn save_result_rejects_negative_values() {
    let (address, pool) = spawn_app().await;
    let text_id = seed_text(&pool, "Sample", "the quick fox").await;
    let alice = TestUser::sign_up(&address, "alice", "a@x.com").await;

    for body in [
        serde_json::json!({"text_id": text_id, "wpm": -1, "accuracy": 90.0, "errors": 0}),
        serde_json::json!({"text_id": text_id, "wpm": 10, "accuracy": 90.0, "errors": -2}),
        serde_json::json!({"text_id": text_id, "wpm": 10, "accuracy": -0.5, "errors": 0}),
    ] {
        let response = alice.save_result(body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    assert_eq!(count(&pool, "test_session").await, 0);
    assert_eq!(count(&pool, "result").await, 0);
}

#[tokio::test]
async fn save_result_accepts_accuracy_above_hundred() {
    let (address, pool) = spawn_app().await;
    let text_id = seed_text(&pool, "Sample", "the quick fox").await;
    let alice = TestUser::sign_up(&address, "alice", "a@x.com").await;

    let response = alice
        .save_result(serde_json::json!({"text_id": text_id, "wpm": 10, "accuracy": 120.0, "errors": 0}))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn save_result_for_missing_text_writes_nothing() {
    let (address, pool) = spawn_app().await;
    let alice = TestUser::sign_up(&address, "alice", "a@x.com").await;

    let response = alice
        .save_result(serde_json::json!({"text_id": 42, "wpm": 10, "accuracy": 90.0, "errors": 0}))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(count(&pool, "test_session").await, 0);
}

#[tokio::test]
async fn save_result_rejects_missing_fields() {
    let (address, pool) = spawn_app().await;
    let text_id = seed_text(&pool, "Sample", "the quick fox").await;
    let alice = TestUser::sign_up(&address, "alice", "a@x.com").await;

    for body in [
        serde_json::json!({"text_id": text_id, "wpm": 10}),
        serde_json::json!({"text_id": text_id, "wpm": "fast", "accuracy": 90.0, "errors": 0}),
    ] {
        let response = alice.save_result(body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }
    assert_eq!(count(&pool, "test_session").await, 0);
}

#[tokio::test]
async fn export_results_as_csv() {
    let (address, pool) = spawn_app().await;
    let text_id = seed_text(&pool, "Sample", "the quick fox").await;
    let alice = TestUser::sign_up(&address, "alice", "a@x.com").await;

    // Insert with a fixed timestamp to get a predictable row.
    let user_id: i64 = sqlx::query_scalar("SELECT id FROM user WHERE username = 'alice'")
        .fetch_one(&pool)
        .await
        .unwrap();
    let session_id: i64 = sqlx::query_scalar(
        "INSERT INTO test_session (user_id, text_id, started_at) VALUES (?, ?, '2024-01-01 09:59:00') RETURNING id",
    )
    .bind(user_id)
    .bind(text_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO result (session_id, wpm, accuracy, errors_count, created_at) VALUES (?, 40, 95.5, 2, '2024-01-01 10:00:00')",
    )
    .bind(session_id)
    .execute(&pool)
    .await
    .unwrap();

    let response = alice.get("/export_results").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=my_results.csv"
    );

    let body = response.text().await.unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines, vec!["Дата,WPM,Точность %,Ошибки", "2024-01-01 10:00,40,95.5,2"]);
}

#[tokio::test]
async fn admin_grant_applies_without_relogin() {
    let (address, pool) = spawn_app().await;
    let alice = TestUser::sign_up(&address, "alice", "a@x.com").await;

    assert_eq!(alice.get("/text/new").await.status(), StatusCode::FORBIDDEN);

    SqliteStore::new(pool.clone())
        .grant_admin("alice")
        .await
        .unwrap()
        .expect("alice exists");

    assert_eq!(alice.get("/text/new").await.status(), StatusCode::OK);
}
