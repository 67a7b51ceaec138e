// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh_token,

        // --- Users ---
        handlers::users::get_me,
        handlers::users::update_me,
        handlers::users::delete_me,
        handlers::users::reset_password,
        handlers::users::forgot_password,
        handlers::users::reset_password_confirm,

        // --- Properties ---
        handlers::properties::create_property,
        handlers::properties::list_properties,
        handlers::properties::update_property,
        handlers::properties::delete_property,

        // --- Houses ---
        handlers::houses::create_house,
        handlers::houses::list_houses,
        handlers::houses::update_house,
        handlers::houses::delete_house,

        // --- Expenses ---
        handlers::expenses::create_expense,
        handlers::expenses::list_expenses,
        handlers::expenses::update_expense,
        handlers::expenses::delete_expense,

        // --- Tenants ---
        handlers::tenants::create_tenant,
        handlers::tenants::list_tenants,
        handlers::tenants::update_tenant,
        handlers::tenants::delete_tenant,

        // --- Guarantor ---
        handlers::guarantor::create_guarantor,
        handlers::guarantor::get_guarantor,
        handlers::guarantor::update_guarantor,
        handlers::guarantor::delete_guarantor,

        // --- Templates ---
        handlers::templates::create_template,
        handlers::templates::list_templates,
        handlers::templates::get_template,
        handlers::templates::update_template,
        handlers::templates::delete_template,

        // --- Contracts ---
        handlers::contracts::create_contract,
        handlers::contracts::list_contracts,
        handlers::contracts::get_contract,
        handlers::contracts::delete_contract,
        handlers::contracts::contract_pdf,
        handlers::contracts::submit_signed_contract,

        // --- Installments ---
        handlers::installments::generate_installments,
        handlers::installments::list_installments,
        handlers::installments::update_installment,

        // --- Inspections ---
        handlers::inspections::get_inspection,
        handlers::inspections::create_inspection,
        handlers::inspections::submit_signed_inspection,

        // --- Dashboard ---
        handlers::dashboard::totals,
        handlers::dashboard::houses_availability,
        handlers::dashboard::cash_flow,
        handlers::dashboard::payment_status,

        // --- Reports ---
        handlers::reports::generate_report,

        // --- Notifications ---
        handlers::notifications::overdue_scan,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Owner,
            models::auth::RegisterOwnerPayload,
            models::auth::LoginPayload,
            models::auth::RefreshTokenPayload,
            models::auth::TokenPairResponse,
            models::auth::UpdateOwnerPayload,
            models::auth::UpdatePasswordPayload,
            models::auth::ForgotPasswordPayload,
            models::auth::ResetPasswordConfirmPayload,
            handlers::auth::RegisterResponse,

            // --- Properties ---
            models::address::Address,
            models::property::Property,
            models::property::House,
            models::property::HouseStatus,
            models::property::Expense,
            models::property::ExpenseKind,
            models::property::CreatePropertyPayload,
            models::property::UpdatePropertyPayload,
            models::property::UpdateHousePayload,
            models::property::CreateExpensePayload,
            models::property::UpdateExpensePayload,

            // --- Tenants ---
            models::tenant::Tenant,
            models::tenant::Guarantor,
            models::tenant::CreateTenantPayload,
            models::tenant::UpdateTenantPayload,
            models::tenant::CreateGuarantorPayload,
            models::tenant::UpdateGuarantorPayload,

            // --- Contracts ---
            models::contract::Template,
            models::contract::Contract,
            models::contract::PaymentInstallment,
            models::contract::Inspection,
            models::contract::WarrantyKind,
            models::contract::ContractKind,
            models::contract::ReadjustmentIndex,
            models::contract::PaymentKind,
            models::contract::CreateTemplatePayload,
            models::contract::UpdateTemplatePayload,
            models::contract::CreateContractPayload,
            models::contract::UpdateInstallmentPayload,
            models::contract::InspectionForm,
            models::contract::ItemCondition,
            models::contract::PaintCondition,
            models::contract::KeysCondition,

            // --- Dashboard ---
            models::dashboard::Totals,
            models::dashboard::HousesAvailability,
            models::dashboard::CashFlow,
            models::dashboard::PaymentStatus,
        )
    ),
    tags(
        (name = "auth", description = "Autenticação e Registro"),
        (name = "users", description = "Perfil do Locador e Senha"),
        (name = "properties", description = "Gestão de Propriedades"),
        (name = "houses", description = "Gestão de Casas"),
        (name = "expenses", description = "Despesas das Casas"),
        (name = "tenants", description = "Gestão de Inquilinos"),
        (name = "guarantor", description = "Fiadores dos Inquilinos"),
        (name = "templates", description = "Templates de Contrato"),
        (name = "contracts", description = "Contratos de Locação e PDFs"),
        (name = "installments", description = "Parcelas de Aluguel"),
        (name = "inspections", description = "Vistorias e Laudos"),
        (name = "dashboard", description = "Indicadores Gerenciais"),
        (name = "reports", description = "Relatório Anual"),
        (name = "notifications", description = "Avisos de Inadimplência")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
