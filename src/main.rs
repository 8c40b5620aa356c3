//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let password_reset_routes = Router::new()
        .route("/request", post(handlers::auth::request_reset))
        .route("/validate/{token}", get(handlers::auth::validate_reset))
        .route("/reset", post(handlers::auth::reset_password));

    // Rotas protegidas (exigem token de sessão)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/authenticate-manager",
            post(handlers::users::authenticate_manager),
        )
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        );

    let register_routes = Router::new()
        .route("/open", post(handlers::registers::open))
        .route("/current", get(handlers::registers::current))
        .route("/dashboard", get(handlers::registers::dashboard))
        .route("/withdrawal", post(handlers::registers::withdrawal))
        .route("/close", post(handlers::registers::close))
        .route("/history", get(handlers::registers::history));

    let sale_routes = Router::new()
        .route(
            "/",
            post(handlers::sales::create).get(handlers::sales::list),
        )
        .route("/{id}", get(handlers::sales::detail))
        .route("/{id}/cancel", put(handlers::sales::cancel));

    let report_routes = Router::new()
        .route("/daily", get(handlers::reports::daily))
        .route("/weekly", get(handlers::reports::weekly))
        .route("/monthly", get(handlers::reports::monthly))
        .route("/products", get(handlers::reports::products))
        .route("/daily/export/{format}", get(handlers::reports::daily_export))
        .route(
            "/weekly/export/{format}",
            get(handlers::reports::weekly_export),
        )
        .route(
            "/monthly/export/{format}",
            get(handlers::reports::monthly_export),
        )
        .route(
            "/products/export/{format}",
            get(handlers::reports::products_export),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::catalog::list_products).post(handlers::catalog::create_product),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_product)
                .put(handlers::catalog::update_product)
                .delete(handlers::catalog::delete_product),
        );

    let category_routes = Router::new()
        .route(
            "/",
            get(handlers::catalog::list_categories).post(handlers::catalog::create_category),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_category)
                .put(handlers::catalog::update_category)
                .delete(handlers::catalog::delete_category),
        );

    let supplier_routes = Router::new()
        .route(
            "/",
            get(handlers::catalog::list_suppliers).post(handlers::catalog::create_supplier),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_supplier)
                .put(handlers::catalog::update_supplier)
                .delete(handlers::catalog::delete_supplier),
        );

    let consumer_routes = Router::new()
        .route(
            "/",
            get(handlers::catalog::list_consumers).post(handlers::catalog::create_consumer),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_consumer)
                .put(handlers::catalog::update_consumer)
                .delete(handlers::catalog::delete_consumer),
        );

    let protected = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/register", register_routes)
        .nest("/api/sales", sale_routes)
        .nest("/api/reports", report_routes)
        .nest("/api/products", product_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/suppliers", supplier_routes)
        .nest("/api/consumers", consumer_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/password-reset", password_reset_routes)
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
