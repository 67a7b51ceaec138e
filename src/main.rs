// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod clients;
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppConfig, AppState};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let config = AppConfig::from_env();
    let app_state = AppState::new(config)
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas: cadastro, login e o fluxo de recuperação de senha.
    // A varredura de inadimplência também é pública, pensada para um cron.
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh-token", post(handlers::auth::refresh_token))
        .route("/users/forgot-password", post(handlers::users::forgot_password))
        .route(
            "/users/reset-password/confirm",
            post(handlers::users::reset_password_confirm),
        )
        .route(
            "/notifications/overdue-scan",
            post(handlers::notifications::overdue_scan),
        );

    // Todo o resto exige o token de acesso do locador.
    let protected_routes = Router::new()
        // --- Perfil ---
        .route(
            "/users/me",
            get(handlers::users::get_me)
                .patch(handlers::users::update_me)
                .delete(handlers::users::delete_me),
        )
        .route("/users/reset-password", post(handlers::users::reset_password))
        // --- Propriedades e casas ---
        .route(
            "/properties",
            post(handlers::properties::create_property).get(handlers::properties::list_properties),
        )
        .route(
            "/properties/{property_id}",
            patch(handlers::properties::update_property)
                .delete(handlers::properties::delete_property),
        )
        .route("/houses", get(handlers::houses::list_houses))
        // POST recebe o id da propriedade; PATCH/DELETE o id da casa
        .route(
            "/houses/{id}",
            post(handlers::houses::create_house)
                .patch(handlers::houses::update_house)
                .delete(handlers::houses::delete_house),
        )
        // POST/GET recebem o id da casa; PATCH/DELETE o id da despesa
        .route(
            "/expenses/{id}",
            post(handlers::expenses::create_expense)
                .get(handlers::expenses::list_expenses)
                .patch(handlers::expenses::update_expense)
                .delete(handlers::expenses::delete_expense),
        )
        // --- Inquilinos e fiadores ---
        .route(
            "/tenants",
            post(handlers::tenants::create_tenant).get(handlers::tenants::list_tenants),
        )
        .route(
            "/tenants/{tenant_id}",
            patch(handlers::tenants::update_tenant).delete(handlers::tenants::delete_tenant),
        )
        // POST/GET recebem o id do inquilino; PATCH/DELETE o id do fiador
        .route(
            "/guarantor/{id}",
            post(handlers::guarantor::create_guarantor)
                .get(handlers::guarantor::get_guarantor)
                .patch(handlers::guarantor::update_guarantor)
                .delete(handlers::guarantor::delete_guarantor),
        )
        // --- Templates e contratos ---
        .route(
            "/templates",
            post(handlers::templates::create_template).get(handlers::templates::list_templates),
        )
        .route(
            "/templates/{template_id}",
            get(handlers::templates::get_template)
                .patch(handlers::templates::update_template)
                .delete(handlers::templates::delete_template),
        )
        .route(
            "/contracts",
            post(handlers::contracts::create_contract).get(handlers::contracts::list_contracts),
        )
        .route(
            "/contracts/{contract_id}",
            get(handlers::contracts::get_contract).delete(handlers::contracts::delete_contract),
        )
        .route("/contracts/{contract_id}/pdf", get(handlers::contracts::contract_pdf))
        .route(
            "/contracts/{contract_id}/signed",
            patch(handlers::contracts::submit_signed_contract),
        )
        // POST/GET recebem o id do contrato; PATCH o id da parcela
        .route(
            "/payment_installment/{id}",
            post(handlers::installments::generate_installments)
                .get(handlers::installments::list_installments)
                .patch(handlers::installments::update_installment),
        )
        // POST/GET recebem o id do contrato; PATCH o id da vistoria
        .route(
            "/inspection/{id}",
            post(handlers::inspections::create_inspection)
                .get(handlers::inspections::get_inspection)
                .patch(handlers::inspections::submit_signed_inspection),
        )
        // --- Dashboard e relatório ---
        .route("/dashboard/totals", get(handlers::dashboard::totals))
        .route(
            "/dashboard/houses-availability",
            get(handlers::dashboard::houses_availability),
        )
        .route("/dashboard/cash-flow", get(handlers::dashboard::cash_flow))
        .route("/dashboard/payment-status", get(handlers::dashboard::payment_status))
        .route("/generate-report", post(handlers::reports::generate_report))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
