#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use crate::store::{InMemoryStore, RecordStatus, StoredRecord};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use payhost_config::{AppConfig, PayfastConfig, ServerConfig};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app_config(use_payfast: bool) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            use_payfast,
            payfast: Some(PayfastConfig {
                merchant_id: "10000100".to_string(),
                merchant_key: "46f0cd694581a".to_string(),
                sandbox: true,
                base_url: None,
                public_base_url: "http://localhost:3000".to_string(),
            }),
        })
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn create_payment_returns_redirect_form_and_stores_pending_order() {
        let store = Arc::new(InMemoryStore::new());
        let app = routes(test_app_config(true), store.clone());

        let response = app
            .oneshot(form_request(
                "/payfast/create-payment",
                "amount=10&item_name=Widget",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("https://sandbox.payfast.co.za/eng/process"));
        assert!(html.contains(r#"name="amount" value="10.00""#));
        assert!(html.contains(r#"name="signature""#));

        let records = store_snapshot(&store);
        assert_eq!(records.len(), 1);
        let (payment_id, record) = &records[0];
        assert!(payment_id.starts_with("ord-"));
        assert!(html.contains(payment_id.as_str()));
        assert_eq!(record.status(), RecordStatus::Pending);
    }

    #[tokio::test]
    async fn create_subscription_stores_pending_subscription() {
        let store = Arc::new(InMemoryStore::new());
        let app = routes(test_app_config(true), store.clone());

        let response = app
            .oneshot(form_request(
                "/payfast/create-subscription",
                "amount=49.90&item_name=Monthly%20plan&frequency=3&user_id=user-42",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"name="subscription_type" value="1""#));
        assert!(html.contains(r#"name="recurring_amount" value="49.90""#));

        let records = store_snapshot(&store);
        assert_eq!(records.len(), 1);
        assert!(records[0].0.starts_with("sub-"));
        match &records[0].1 {
            StoredRecord::Subscription(subscription) => {
                assert_eq!(subscription.user_id.as_deref(), Some("user-42"));
                assert_eq!(subscription.status, RecordStatus::Pending);
            }
            other => panic!("expected a subscription, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_payment_rejects_invalid_amount() {
        let store = Arc::new(InMemoryStore::new());
        let app = routes(test_app_config(true), store.clone());

        let response = app
            .oneshot(form_request(
                "/payfast/create-payment",
                "amount=0&item_name=Widget",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store_snapshot(&store).is_empty());
    }

    #[tokio::test]
    async fn disabled_service_answers_503_on_checkout() {
        let store = Arc::new(InMemoryStore::new());
        let app = routes(test_app_config(false), store);

        let response = app
            .oneshot(form_request(
                "/payfast/create-payment",
                "amount=10&item_name=Widget",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn ipn_acknowledges_immediately_regardless_of_outcome() {
        let store = Arc::new(InMemoryStore::new());
        let app = routes(test_app_config(true), store.clone());

        // Garbage signature: the background pipeline will reject it, but
        // the acknowledgment must still be an empty 200.
        let response = app
            .oneshot(form_request(
                "/payfast/ipn",
                "m_payment_id=ord-1&amount=10.00&payment_status=COMPLETE&signature=bogus",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.is_empty());
        assert!(store_snapshot(&store).is_empty());
    }

    #[tokio::test]
    async fn landing_pages_render() {
        let app = routes(test_app_config(true), Arc::new(InMemoryStore::new()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/payfast/pay-success")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Payment Successful"));
    }

    fn store_snapshot(store: &Arc<InMemoryStore>) -> Vec<(String, StoredRecord)> {
        store.snapshot()
    }
}
