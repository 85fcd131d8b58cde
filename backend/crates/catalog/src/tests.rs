//! Catalog HTTP tests against an in-memory product list

#[cfg(test)]
mod http_tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rust_decimal::Decimal;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::domain::product::{Product, ProductId};
    use crate::domain::repository::ProductRepository;
    use crate::error::{CatalogError, CatalogResult};
    use crate::presentation::catalog_router_generic;

    #[derive(Clone)]
    struct FixedCatalog(Vec<Product>);

    impl ProductRepository for FixedCatalog {
        async fn list_all(&self) -> CatalogResult<Vec<Product>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Clone)]
    struct BrokenCatalog;

    impl ProductRepository for BrokenCatalog {
        async fn list_all(&self) -> CatalogResult<Vec<Product>> {
            Err(CatalogError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_products() {
        let app = catalog_router_generic(FixedCatalog(vec![
            Product {
                id: ProductId::new(1),
                name: "Mug".to_string(),
                price: Decimal::new(1250, 2),
                stock: 5,
            },
            Product {
                id: ProductId::new(2),
                name: "Poster".to_string(),
                price: Decimal::new(800, 2),
                stock: 1,
            },
        ]));

        let response = app.oneshot(get("/products")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], 1);
        assert_eq!(items[0]["name"], "Mug");
        assert_eq!(items[0]["price"], "12.50");
        assert_eq!(items[1]["stock"], 1);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let app = catalog_router_generic(FixedCatalog(Vec::new()));
        let response = app.oneshot(get("/products")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_store_failure_is_opaque_500() {
        let app = catalog_router_generic(BrokenCatalog);
        let response = app.oneshot(get("/products")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["detail"], "Persistence failure");
    }
}
