//! Shop API Client

use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cart::Cart;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AuthResponse, OrderResult, OrderSummary, PlaceOrderRequest, Problem, Product, User,
};
use crate::session::{Session, SessionStore};

#[derive(Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    secret: &'a str,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    secret: &'a str,
}

/// HTTP client bound to one session
pub struct ShopClient<S>
where
    S: SessionStore,
{
    http: reqwest::Client,
    base_url: String,
    store: S,
    session: Session,
}

impl<S> ShopClient<S>
where
    S: SessionStore,
{
    /// Restore the stored session and bind it to `base_url`.
    pub async fn connect(base_url: impl Into<String>, store: S) -> ClientResult<Self> {
        let session = store.load().await?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cart(&self) -> &Cart {
        &self.session.cart
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        let response = self.http.get(self.url("/products")).send().await?;
        decode(response).await
    }

    // ========================================================================
    // Auth
    // ========================================================================

    pub async fn register(&mut self, name: &str, email: &str, secret: &str) -> ClientResult<User> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&RegisterBody {
                name,
                email,
                secret,
            })
            .send()
            .await?;
        let auth: AuthResponse = decode(response).await?;
        self.start_session(auth).await
    }

    pub async fn login(&mut self, email: &str, secret: &str) -> ClientResult<User> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginBody { email, secret })
            .send()
            .await?;
        let auth: AuthResponse = decode(response).await?;
        self.start_session(auth).await
    }

    /// Confirm the stored token is still accepted. A rejected token ends the
    /// session.
    pub async fn me(&mut self) -> ClientResult<User> {
        let token = self.token()?;
        let response = self
            .http
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;

        match decode::<User>(response).await {
            Ok(user) => {
                self.session.user = Some(user.clone());
                self.persist().await?;
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Stored token rejected; logging out");
                self.session.log_out();
                self.persist().await?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn logout(&mut self) -> ClientResult<()> {
        self.session = Session::default();
        self.store.clear().await
    }

    // ========================================================================
    // Cart
    // ========================================================================

    pub async fn add_to_cart(&mut self, product: &Product, quantity: u32) -> ClientResult<()> {
        self.session.cart.add(product, quantity)?;
        self.persist().await
    }

    pub async fn set_cart_quantity(&mut self, product_id: i64, quantity: u32) -> ClientResult<()> {
        self.session.cart.set_quantity(product_id, quantity)?;
        self.persist().await
    }

    pub async fn clear_cart(&mut self) -> ClientResult<()> {
        self.session.cart.clear();
        self.persist().await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Submit the cart. The cart is emptied only when the order was created.
    pub async fn place_order(&mut self) -> ClientResult<OrderResult> {
        let token = self.token()?;
        if self.session.cart.is_empty() {
            return Err(ClientError::EmptyCart);
        }

        let body = PlaceOrderRequest {
            lines: self.session.cart.to_order_lines(),
        };
        let response = self
            .http
            .post(self.url("/orders"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let order: OrderResult = decode(response).await?;

        tracing::info!(order_id = %order.order_id, total_units = order.total_units, "Order placed");

        self.session.cart.clear();
        self.persist().await?;
        Ok(order)
    }

    pub async fn my_orders(&self) -> ClientResult<Vec<OrderSummary>> {
        let token = self.token()?;
        let response = self
            .http
            .get(self.url("/orders/mine"))
            .bearer_auth(token)
            .send()
            .await?;
        decode(response).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn token(&self) -> ClientResult<String> {
        self.session.token.clone().ok_or(ClientError::NotLoggedIn)
    }

    async fn start_session(&mut self, auth: AuthResponse) -> ClientResult<User> {
        self.session.user = Some(auth.user.clone());
        self.session.token = Some(auth.token);
        self.persist().await?;
        tracing::debug!(user_id = %auth.user.id, "Session started");
        Ok(auth.user)
    }

    async fn persist(&self) -> ClientResult<()> {
        self.store.save(&self.session).await
    }
}

/// Decode a success body, or turn a problem document into `ClientError::Api`.
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let problem: Problem = response.json().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        title: if problem.title.is_empty() {
            status.canonical_reason().unwrap_or("Error").to_string()
        } else {
            problem.title
        },
        detail: problem.detail,
        action: problem.action,
    })
}
