pub mod auth;
pub mod dashboard_service;
pub mod document_service;
pub mod installment_service;
pub mod notification_service;
