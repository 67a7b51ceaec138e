// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    clients::{MailClient, PushClient, StorageClient},
    db::{
        ContractRepository, DashboardRepository, OwnerRepository, PropertyRepository,
        TemplateRepository, TenantRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService, document_service::DocumentService,
        installment_service::InstallmentService, notification_service::NotificationService,
    },
};

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

// Toda a configuração sai do ambiente, lida uma única vez no main.
// Variável obrigatória ausente derruba a aplicação na partida, de propósito.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
    pub storage_api_url: String,
    pub storage_bucket: String,
    pub storage_token: String,
    pub push_api_url: String,
    pub mail_service_url: String,
    pub fonts_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido"),
            jwt_issuer: env_or("JWT_ISSUER", "e-aluguel"),
            access_ttl_minutes: env_or("ACCESS_TOKEN_TTL_MINUTES", "15")
                .parse()
                .expect("ACCESS_TOKEN_TTL_MINUTES deve ser um número"),
            refresh_ttl_days: env_or("REFRESH_TOKEN_TTL_DAYS", "30")
                .parse()
                .expect("REFRESH_TOKEN_TTL_DAYS deve ser um número"),
            storage_api_url: env_or("STORAGE_API_URL", "https://storage.googleapis.com"),
            storage_bucket: env_or("STORAGE_BUCKET", "e-aluguel"),
            storage_token: env::var("STORAGE_TOKEN").expect("STORAGE_TOKEN deve ser definido"),
            push_api_url: env_or("PUSH_API_URL", "https://exp.host/--/api/v2/push/send"),
            mail_service_url: env::var("MAIL_SERVICE_URL")
                .expect("MAIL_SERVICE_URL deve ser definida"),
            fonts_dir: env_or("FONTS_DIR", "./fonts"),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub owner_repo: OwnerRepository,
    pub property_repo: PropertyRepository,
    pub tenant_repo: TenantRepository,
    pub template_repo: TemplateRepository,
    pub contract_repo: ContractRepository,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub document_service: DocumentService,
    pub installment_service: InstallmentService,
    pub notification_service: NotificationService,
    pub storage_client: StorageClient,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let owner_repo = OwnerRepository::new(db_pool.clone());
        let property_repo = PropertyRepository::new(db_pool.clone());
        let tenant_repo = TenantRepository::new(db_pool.clone());
        let template_repo = TemplateRepository::new(db_pool.clone());
        let contract_repo = ContractRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let storage_client = StorageClient::new(
            config.storage_api_url,
            config.storage_bucket,
            config.storage_token,
        );
        let push_client = PushClient::new(config.push_api_url);
        let mail_client = MailClient::new(config.mail_service_url);

        let auth_service = AuthService::new(
            owner_repo.clone(),
            mail_client,
            db_pool.clone(),
            config.jwt_secret,
            config.jwt_issuer,
            config.access_ttl_minutes,
            config.refresh_ttl_days,
        );
        let dashboard_service = DashboardService::new(dashboard_repo.clone());
        let document_service = DocumentService::new(
            contract_repo.clone(),
            tenant_repo.clone(),
            property_repo.clone(),
            template_repo.clone(),
            owner_repo.clone(),
            dashboard_repo,
            storage_client.clone(),
            config.fonts_dir,
        );
        let installment_service = InstallmentService::new(contract_repo.clone(), db_pool.clone());
        let notification_service = NotificationService::new(contract_repo.clone(), push_client);

        Ok(Self {
            db_pool,
            owner_repo,
            property_repo,
            tenant_repo,
            template_repo,
            contract_repo,
            auth_service,
            dashboard_service,
            document_service,
            installment_service,
            notification_service,
            storage_client,
        })
    }
}
