use std::sync::Arc;

use auth::AuthService;
use auth::AuthSettings;
use book_service::domain::book::service::BookService;
use book_service::inbound::http::router::create_router;
use book_service::outbound::repositories::InMemoryBookRepository;

pub const SECRET_KEY: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_PASSWORD: &str = "admin-test-password";

/// Six books over four categories, prices 10.00 to 55.00.
pub const BOOKS_CSV: &str = "\
title,price,rating,availability,category,image_url
A Light in the Attic,£51.77,3,22,Poetry,https://books.example/attic.jpg
Dune,£10.00,5,7,Science Fiction,https://books.example/dune.jpg
The Hobbit,£20.00,4,3,Fantasy,https://books.example/hobbit.jpg
Foundation,£30.00,4,12,Science Fiction,https://books.example/foundation.jpg
Gone Girl,£55.00,2,5,Mystery,https://books.example/gone-girl.jpg
Shakespeare's Sonnets,£20.66,4,19,Poetry,https://books.example/sonnets.jpg
";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application over the fixture catalog.
    pub async fn spawn() -> Self {
        let repository = InMemoryBookRepository::from_reader(BOOKS_CSV.as_bytes())
            .expect("Failed to parse fixture catalog");
        Self::spawn_with_repository(repository).await
    }

    /// Spawn the application with no book data loaded.
    pub async fn spawn_without_data() -> Self {
        Self::spawn_with_repository(InMemoryBookRepository::empty()).await
    }

    async fn spawn_with_repository(repository: InMemoryBookRepository) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let book_service = Arc::new(BookService::new(Arc::new(repository)));
        let auth_service = Arc::new(
            AuthService::from_settings(&test_settings()).expect("Failed to build auth service"),
        );

        let router = create_router(book_service, auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with a bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path)
            .header("Authorization", format!("Bearer {}", token))
    }

    /// Submit the login form.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in as the seeded admin and return the access token.
    pub async fn admin_access_token(&self) -> String {
        let response = self.login("admin", ADMIN_PASSWORD).await;
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"].as_str().unwrap().to_string()
    }
}

pub fn test_settings() -> AuthSettings {
    AuthSettings {
        secret_key: SECRET_KEY.to_string(),
        algorithm: "HS256".to_string(),
        access_token_ttl_minutes: 30,
        refresh_token_ttl_days: 7,
        default_admin_password: ADMIN_PASSWORD.to_string(),
    }
}
