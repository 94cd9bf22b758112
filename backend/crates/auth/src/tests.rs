//! Unit tests for Auth crate

#[cfg(test)]
mod support {
    //! In-memory repository for exercising use cases without a database

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::response::Response;

    use crate::domain::entity::user::User;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{email::Email, session_token::SessionToken};
    use crate::error::{AuthError, AuthResult};

    /// HashMap-backed stand-in for the Postgres repository
    ///
    /// Clones share state, so a handle kept by a test sees writes made
    /// through the router.
    #[derive(Clone, Default)]
    pub struct MemoryUserRepository {
        users: Arc<Mutex<HashMap<String, User>>>,
    }

    impl MemoryUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn stored_token(&self, email: &str) -> Option<String> {
            self.users
                .lock()
                .unwrap()
                .get(email)
                .and_then(|u| u.session_token.as_ref().map(|t| t.as_str().to_string()))
        }
    }

    impl UserRepository for MemoryUserRepository {
        async fn create(&self, user: &User) -> AuthResult<()> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(user.email.as_str()) {
                return Err(AuthError::EmailTaken);
            }
            users.insert(user.email.as_str().to_string(), user.clone());
            Ok(())
        }

        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
            Ok(self.users.lock().unwrap().get(email.as_str()).cloned())
        }

        async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
            Ok(self.users.lock().unwrap().contains_key(email.as_str()))
        }

        async fn find_by_session_token(&self, token: &SessionToken) -> AuthResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.session_token.as_ref() == Some(token))
                .cloned())
        }

        async fn update_session(&self, user: &User) -> AuthResult<()> {
            self.users
                .lock()
                .unwrap()
                .insert(user.email.as_str().to_string(), user.clone());
            Ok(())
        }
    }

    /// Read a response body as text
    pub async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::presentation::dto::*;

    #[test]
    fn test_register_request_deserialization() {
        let json = r#"{"email":"user@example.com","password":"TestPassword123!"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.email, "user@example.com");
        assert_eq!(req.password, "TestPassword123!");
    }

    #[test]
    fn test_register_request_missing_field() {
        let json = r#"{"email":"user@example.com"}"#;
        assert!(serde_json::from_str::<RegisterRequest>(json).is_err());
    }

    #[test]
    fn test_login_request_deserialization() {
        let json = r#"{"email":"user@example.com","password":"TestPassword123!"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.email, "user@example.com");
        assert_eq!(req.password, "TestPassword123!");
    }
}

#[cfg(test)]
mod config_tests {
    use std::time::Duration;

    use crate::application::config::{AuthConfig, SameSite};

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "session_token");
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
        assert_eq!(config.cookie_path, "/");
    }

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = AuthConfig::default()
            .cookie_config()
            .build_set_cookie("tok");
        assert!(cookie.starts_with("session_token=tok"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }
}

#[cfg(test)]
mod domain_tests {
    use crate::domain::entity::user::User;
    use crate::domain::value_object::{
        email::Email,
        session_token::SessionToken,
        user_password::{RawPassword, UserPassword},
    };

    fn sample_user() -> User {
        let email = Email::new("user@example.com").unwrap();
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw).unwrap();
        User::new(email, hash)
    }

    #[test]
    fn test_new_user_has_no_session() {
        let user = sample_user();
        assert!(user.session_token.is_none());
    }

    #[test]
    fn test_start_session_replaces_token() {
        let mut user = sample_user();

        let first = SessionToken::generate();
        user.start_session(first.clone());
        assert_eq!(user.session_token.as_ref(), Some(&first));

        let second = SessionToken::generate();
        user.start_session(second.clone());
        assert_eq!(user.session_token.as_ref(), Some(&second));
        assert_ne!(user.session_token.as_ref(), Some(&first));
    }

    #[test]
    fn test_start_session_touches_updated_at() {
        let mut user = sample_user();
        let before = user.updated_at;
        user.start_session(SessionToken::generate());
        assert!(user.updated_at >= before);
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::support::body_text;
    use crate::error::*;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::EmailTaken, StatusCode::BAD_REQUEST),
            (
                AuthError::Validation("bad email".into()),
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::SessionMissing, StatusCode::UNAUTHORIZED),
            (AuthError::SessionInvalid, StatusCode::UNAUTHORIZED),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_store_failure_maps_to_service_unavailable() {
        let response = AuthError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let error = AuthError::Internal("dsn postgres://user:secret@db".into());
        let body = body_text(error.into_response()).await;
        assert!(body.contains("Internal error"));
        assert!(!body.contains("postgres://"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::SessionMissing.to_string(), "No session token");
        assert_eq!(AuthError::SessionInvalid.to_string(), "Invalid session");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(AuthError::EmailTaken.to_string(), "Email already in use");
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use super::support::MemoryUserRepository;
    use crate::application::{
        CheckSessionUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    };
    use crate::domain::value_object::session_token::SessionToken;
    use crate::error::AuthError;

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: "TestPassword123!".to_string(),
        }
    }

    fn login_input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn register_user(repo: &Arc<MemoryUserRepository>, email: &str) {
        RegisterUseCase::new(repo.clone())
            .execute(register_input(email))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_creates_user_without_session() {
        let repo = Arc::new(MemoryUserRepository::new());

        let output = RegisterUseCase::new(repo.clone())
            .execute(register_input("user@example.com"))
            .await
            .unwrap();

        assert_eq!(output.email, "user@example.com");
        assert_eq!(repo.stored_token("user@example.com"), None);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let repo = Arc::new(MemoryUserRepository::new());
        register_user(&repo, "user@example.com").await;

        let err = RegisterUseCase::new(repo.clone())
            .execute(register_input("user@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let repo = Arc::new(MemoryUserRepository::new());

        let err = RegisterUseCase::new(repo.clone())
            .execute(register_input("not-an-email"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let repo = Arc::new(MemoryUserRepository::new());

        let err = RegisterUseCase::new(repo.clone())
            .execute(RegisterInput {
                email: "user@example.com".to_string(),
                password: "short".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_stores_fresh_token() {
        let repo = Arc::new(MemoryUserRepository::new());
        register_user(&repo, "user@example.com").await;

        let output = LoginUseCase::new(repo.clone())
            .execute(login_input("user@example.com", "TestPassword123!"))
            .await
            .unwrap();

        assert_eq!(
            repo.stored_token("user@example.com").as_deref(),
            Some(output.session_token.as_str())
        );
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let repo = Arc::new(MemoryUserRepository::new());
        register_user(&repo, "user@example.com").await;

        let err = LoginUseCase::new(repo.clone())
            .execute(login_input("user@example.com", "WrongPassword123!"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email_reads_like_wrong_password() {
        let repo = Arc::new(MemoryUserRepository::new());
        register_user(&repo, "user@example.com").await;

        let wrong_password = LoginUseCase::new(repo.clone())
            .execute(login_input("user@example.com", "WrongPassword123!"))
            .await
            .unwrap_err();

        let unknown_email = LoginUseCase::new(repo.clone())
            .execute(login_input("nobody@example.com", "TestPassword123!"))
            .await
            .unwrap_err();

        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_second_login_invalidates_first_token() {
        let repo = Arc::new(MemoryUserRepository::new());
        register_user(&repo, "user@example.com").await;

        let login = LoginUseCase::new(repo.clone());
        let first = login
            .execute(login_input("user@example.com", "TestPassword123!"))
            .await
            .unwrap()
            .session_token;
        let second = login
            .execute(login_input("user@example.com", "TestPassword123!"))
            .await
            .unwrap()
            .session_token;

        let check = CheckSessionUseCase::new(repo.clone());
        assert!(check.execute(&first).await.is_err());

        let user = check.execute(&second).await.unwrap();
        assert_eq!(user.email.as_str(), "user@example.com");
    }

    #[tokio::test]
    async fn test_check_session_rejects_unknown_token() {
        let repo = Arc::new(MemoryUserRepository::new());

        let err = CheckSessionUseCase::new(repo.clone())
            .execute(&SessionToken::generate())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::SessionInvalid));
    }
}

#[cfg(test)]
mod presentation_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::support::{MemoryUserRepository, body_text};
    use crate::application::config::AuthConfig;
    use crate::presentation::router::auth_router_generic;

    fn test_app() -> Router {
        auth_router_generic(MemoryUserRepository::new(), AuthConfig::default())
    }

    fn json_post(path: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn register(router: &Router, email: &str, password: &str) {
        let body = format!(r#"{{"email":"{}","password":"{}"}}"#, email, password);
        let response = router
            .clone()
            .oneshot(json_post("/newUser", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    async fn login(router: &Router, email: &str, password: &str) -> axum::response::Response {
        let body = format!(r#"{{"email":"{}","password":"{}"}}"#, email, password);
        router
            .clone()
            .oneshot(json_post("/login", &body))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_returns_201() {
        let router = test_app();

        let response = router
            .clone()
            .oneshot(json_post(
                "/newUser",
                r#"{"email":"user@example.com","password":"TestPassword123!"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_text(response).await, "User registered");
    }

    #[tokio::test]
    async fn test_register_malformed_json_returns_400() {
        let router = test_app();

        let response = router
            .clone()
            .oneshot(json_post("/newUser", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_wrong_field_type_returns_400() {
        let router = test_app();

        let response = router
            .clone()
            .oneshot(json_post(
                "/newUser",
                r#"{"email":"user@example.com","password":42}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_duplicate_returns_400() {
        let router = test_app();
        register(&router, "user@example.com", "TestPassword123!").await;

        let response = router
            .clone()
            .oneshot(json_post(
                "/newUser",
                r#"{"email":"user@example.com","password":"TestPassword123!"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_sets_session_cookie() {
        let router = test_app();
        register(&router, "user@example.com", "TestPassword123!").await;

        let response = login(&router, "user@example.com", "TestPassword123!").await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("session_token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));

        assert_eq!(body_text(response).await, "Login successful");
    }

    #[tokio::test]
    async fn test_login_wrong_password_returns_401() {
        let router = test_app();
        register(&router, "user@example.com", "TestPassword123!").await;

        let response = login(&router, "user@example.com", "WrongPassword123!").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_unknown_email_returns_401() {
        let router = test_app();
        register(&router, "user@example.com", "TestPassword123!").await;

        let response = login(&router, "nobody@example.com", "TestPassword123!").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_malformed_json_returns_400() {
        let router = test_app();

        let response = router
            .clone()
            .oneshot(json_post("/login", "not json at all"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod middleware_tests {
    use std::sync::Arc;

    use axum::http::{Request, StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::{Extension, Router, body::Body};
    use tower::ServiceExt;

    use super::support::{MemoryUserRepository, body_text};
    use crate::application::config::AuthConfig;
    use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
    use crate::presentation::middleware::{AuthGateState, require_session};
    use kernel::identity::CurrentUser;

    async fn whoami(Extension(user): Extension<CurrentUser>) -> String {
        user.email
    }

    fn gated_app(repo: MemoryUserRepository) -> Router {
        let state = AuthGateState {
            repo: Arc::new(repo),
            config: Arc::new(AuthConfig::default()),
        };
        Router::new().route("/whoami", get(whoami)).layer(
            from_fn_with_state(state, require_session::<MemoryUserRepository>),
        )
    }

    async fn seeded_session(repo: &MemoryUserRepository) -> String {
        let repo = Arc::new(repo.clone());
        RegisterUseCase::new(repo.clone())
            .execute(RegisterInput {
                email: "user@example.com".to_string(),
                password: "TestPassword123!".to_string(),
            })
            .await
            .unwrap();
        LoginUseCase::new(repo)
            .execute(LoginInput {
                email: "user@example.com".to_string(),
                password: "TestPassword123!".to_string(),
            })
            .await
            .unwrap()
            .session_token
            .as_str()
            .to_string()
    }

    fn get_with_cookie(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        req.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_cookie_returns_401() {
        let app = gated_app(MemoryUserRepository::new());

        let response = app.oneshot(get_with_cookie("/whoami", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("No session token"));
    }

    #[tokio::test]
    async fn test_empty_cookie_returns_401() {
        let app = gated_app(MemoryUserRepository::new());

        let response = app
            .oneshot(get_with_cookie("/whoami", Some("session_token=")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("No session token"));
    }

    #[tokio::test]
    async fn test_unknown_token_returns_401() {
        let app = gated_app(MemoryUserRepository::new());

        let response = app
            .oneshot(get_with_cookie(
                "/whoami",
                Some("session_token=b1946ac9-2492-4d77-bbe0-8a2fe1f2b1a1"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Invalid session"));
    }

    #[tokio::test]
    async fn test_valid_session_reaches_handler() {
        let repo = MemoryUserRepository::new();
        let token = seeded_session(&repo).await;
        let app = gated_app(repo);

        let cookie = format!("session_token={}", token);
        let response = app
            .oneshot(get_with_cookie("/whoami", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "user@example.com");
    }

    #[tokio::test]
    async fn test_replaced_token_is_rejected() {
        let repo = MemoryUserRepository::new();
        let old_token = seeded_session(&repo).await;

        let new_token = LoginUseCase::new(Arc::new(repo.clone()))
            .execute(LoginInput {
                email: "user@example.com".to_string(),
                password: "TestPassword123!".to_string(),
            })
            .await
            .unwrap()
            .session_token;

        let app = gated_app(repo);

        let response = app
            .clone()
            .oneshot(get_with_cookie(
                "/whoami",
                Some(&format!("session_token={}", old_token)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(get_with_cookie(
                "/whoami",
                Some(&format!("session_token={}", new_token.as_str())),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
