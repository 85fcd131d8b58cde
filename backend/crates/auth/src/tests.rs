//! Use-case and HTTP tests for the auth crate, backed by an in-memory
//! credential store.

#[cfg(test)]
pub(crate) mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::domain::entity::{credential::UserCredential, user::User};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{Email, UserId};
    use crate::error::{AuthError, AuthResult};

    /// Keyed by canonical email, like the unique index.
    #[derive(Clone, Default)]
    pub struct InMemoryUserRepository {
        users: Arc<Mutex<HashMap<String, UserCredential>>>,
    }

    impl InMemoryUserRepository {
        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, credential: &UserCredential) -> AuthResult<()> {
            let mut users = self.users.lock().unwrap();
            let key = credential.user.email.as_str().to_string();
            if users.contains_key(&key) {
                return Err(AuthError::DuplicateEmail);
            }
            users.insert(key, credential.clone());
            Ok(())
        }

        async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
            Ok(self.users.lock().unwrap().contains_key(email.as_str()))
        }

        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserCredential>> {
            Ok(self.users.lock().unwrap().get(email.as_str()).cloned())
        }

        async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|c| &c.user.user_id == user_id)
                .map(|c| c.user.clone()))
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use super::support::InMemoryUserRepository;
    use crate::application::{
        AuthConfig, CurrentUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
        TokenService,
    };
    use crate::error::AuthError;

    struct Fixture {
        repo: Arc<InMemoryUserRepository>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    }

    impl Fixture {
        fn new() -> Self {
            let config = AuthConfig::with_random_secret().with_pepper(Some(b"pepper".to_vec()));
            Self {
                repo: Arc::new(InMemoryUserRepository::default()),
                tokens: Arc::new(TokenService::new(&config)),
                config: Arc::new(config),
            }
        }

        fn register(&self) -> RegisterUseCase<InMemoryUserRepository> {
            RegisterUseCase::new(self.repo.clone(), self.tokens.clone(), self.config.clone())
        }

        fn login(&self) -> LoginUseCase<InMemoryUserRepository> {
            LoginUseCase::new(self.repo.clone(), self.tokens.clone(), self.config.clone())
        }
    }

    fn ana() -> RegisterInput {
        RegisterInput {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            secret: "s3cret1".to_string(),
        }
    }

    fn login_input(email: &str, secret: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            secret: secret.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_resolves_same_subject() {
        let fx = Fixture::new();

        let registered = fx.register().execute(ana()).await.unwrap();
        assert_eq!(registered.user.name.as_str(), "Ana");
        assert_eq!(registered.user.email.as_str(), "ana@x.com");

        let logged_in = fx
            .login()
            .execute(login_input("ana@x.com", "s3cret1"))
            .await
            .unwrap();
        assert_eq!(logged_in.user.user_id, registered.user.user_id);

        let claims = fx.tokens.verify(&logged_in.token.token).unwrap();
        assert_eq!(claims.sub, registered.user.user_id);

        let claims = fx.tokens.verify(&registered.token.token).unwrap();
        assert_eq!(claims.sub, registered.user.user_id);
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let fx = Fixture::new();
        fx.register().execute(ana()).await.unwrap();

        let result = fx
            .login()
            .execute(login_input("  ANA@X.com", "s3cret1"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let fx = Fixture::new();
        fx.register().execute(ana()).await.unwrap();

        let again = RegisterInput {
            name: "Other Ana".to_string(),
            email: "Ana@X.com".to_string(),
            secret: "an0ther!".to_string(),
        };
        let err = fx.register().execute(again).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
        assert_eq!(fx.repo.len(), 1);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let fx = Fixture::new();
        fx.register().execute(ana()).await.unwrap();

        let wrong_secret = fx
            .login()
            .execute(login_input("ana@x.com", "wrong-secret"))
            .await
            .unwrap_err();
        let unknown_email = fx
            .login()
            .execute(login_input("nobody@x.com", "s3cret1"))
            .await
            .unwrap_err();
        let invalid_email = fx
            .login()
            .execute(login_input("not an email", "s3cret1"))
            .await
            .unwrap_err();

        for err in [&wrong_secret, &unknown_email, &invalid_email] {
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
        assert_eq!(wrong_secret.kind(), unknown_email.kind());
        assert_eq!(
            wrong_secret.to_app_error().message(),
            unknown_email.to_app_error().message()
        );
    }

    #[tokio::test]
    async fn test_register_validation() {
        let fx = Fixture::new();

        let cases = [
            ("", "ana@x.com", "s3cret1"),
            ("Ana", "ana-at-x.com", "s3cret1"),
            ("Ana", "ana@x.com", "abc"),
            ("Ana", "ana@x.com", "password"),
        ];
        for (name, email, secret) in cases {
            let err = fx
                .register()
                .execute(RegisterInput {
                    name: name.to_string(),
                    email: email.to_string(),
                    secret: secret.to_string(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)), "{name}/{email}");
        }
        assert_eq!(fx.repo.len(), 0);
    }

    #[tokio::test]
    async fn test_current_user() {
        let fx = Fixture::new();
        let registered = fx.register().execute(ana()).await.unwrap();

        let subject = fx
            .tokens
            .verify(&registered.token.token)
            .unwrap()
            .subject();
        let user = CurrentUserUseCase::new(fx.repo.clone())
            .execute(subject)
            .await
            .unwrap();
        assert_eq!(user, registered.user);
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::InMemoryUserRepository;
    use crate::application::AuthConfig;
    use crate::presentation::{AuthGateState, auth_router_generic};

    fn app() -> Router {
        let config = AuthConfig::with_random_secret();
        let gate = AuthGateState::from_config(&config);
        auth_router_generic(InMemoryUserRepository::default(), Arc::new(config), gate)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with_auth(uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_ana(app: &Router) -> Value {
        let response = app
            .clone()
            .oneshot(post_json(
                "/auth/register",
                json!({"name": "Ana", "email": "ana@x.com", "secret": "s3cret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_register_returns_token_and_user() {
        let app = app();
        let body = register_ana(&app).await;

        assert!(body["token"].as_str().unwrap().split('.').count() == 3);
        assert!(body["expiresAt"].is_string());
        assert_eq!(body["user"]["name"], "Ana");
        assert_eq!(body["user"]["email"], "ana@x.com");
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_is_400() {
        let app = app();
        register_ana(&app).await;

        let response = app
            .oneshot(post_json(
                "/auth/register",
                json!({"name": "Ana", "email": "ANA@x.com", "password": "s3cret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "Email is already registered");
    }

    #[tokio::test]
    async fn test_login_ok_and_invalid() {
        let app = app();
        register_ana(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/auth/login",
                json!({"email": "ana@x.com", "secret": "s3cret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["user"]["name"], "Ana");

        let wrong = app
            .clone()
            .oneshot(post_json(
                "/auth/login",
                json!({"email": "ana@x.com", "secret": "nope-nope"}),
            ))
            .await
            .unwrap();
        let unknown = app
            .oneshot(post_json(
                "/auth/login",
                json!({"email": "bob@x.com", "secret": "s3cret1"}),
            ))
            .await
            .unwrap();

        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(wrong).await, body_json(unknown).await);
    }

    #[tokio::test]
    async fn test_me_requires_bearer() {
        let app = app();
        let token = register_ana(&app).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let missing = app
            .clone()
            .oneshot(get_with_auth("/auth/me", None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(missing.headers()[header::WWW_AUTHENTICATE], "Bearer");
        assert_eq!(body_json(missing).await["detail"], "Missing bearer credential");

        let wrong_scheme = app
            .clone()
            .oneshot(get_with_auth("/auth/me", Some(&format!("Token {token}"))))
            .await
            .unwrap();
        assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(wrong_scheme).await["detail"],
            "Authorization scheme must be Bearer"
        );

        let tampered = app
            .clone()
            .oneshot(get_with_auth("/auth/me", Some(&format!("Bearer {token}x"))))
            .await
            .unwrap();
        assert_eq!(tampered.status(), StatusCode::UNAUTHORIZED);

        let ok = app
            .oneshot(get_with_auth("/auth/me", Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(body_json(ok).await["email"], "ana@x.com");
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"email\":"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["status"], 400);
    }
}
