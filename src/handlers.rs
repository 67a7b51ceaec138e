pub mod auth;
pub mod contracts;
pub mod dashboard;
pub mod expenses;
pub mod guarantor;
pub mod houses;
pub mod inspections;
pub mod installments;
pub mod notifications;
pub mod properties;
pub mod reports;
pub mod templates;
pub mod tenants;
pub mod users;
