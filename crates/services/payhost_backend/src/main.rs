// File: crates/services/payhost_backend/src/main.rs
use axum::{routing::get, Router};
use payhost_config::load_config;
use payhost_payfast::routes as payfast_routes;
use payhost_payfast::store::{InMemoryStore, PaymentStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    payhost_common::logging::init();

    // The store is shared across all concurrent verification tasks.
    let store: Arc<dyn PaymentStore> = Arc::new(InMemoryStore::new());

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Payhost API!" }))
        .merge(payfast_routes(config.clone(), store));

    let mut app = Router::new().nest("/api", api_router);

    // Serve the demo checkout pages for non-API routes
    app = app.fallback_service(ServeDir::new("public"));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use payhost_payfast::doc::PayfastApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Payhost API",
                version = "0.1.0",
                description = "Payhost Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Payhost", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(PayfastApiDoc::openapi());
        println!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);
    if let Some(payfast) = config.payfast.as_ref() {
        println!(
            "PayFast mode: {} (gateway base: {})",
            if payfast.sandbox { "sandbox" } else { "live" },
            payfast.gateway_base()
        );
    }

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
