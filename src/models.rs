pub mod address;
pub mod auth;
pub mod contract;
pub mod dashboard;
pub mod property;
pub mod tenant;
