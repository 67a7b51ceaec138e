pub mod contract_repo;
pub mod dashboard_repo;
pub mod owner_repo;
pub mod property_repo;
pub mod template_repo;
pub mod tenant_repo;

pub use contract_repo::ContractRepository;
pub use dashboard_repo::DashboardRepository;
pub use owner_repo::OwnerRepository;
pub use property_repo::PropertyRepository;
pub use template_repo::TemplateRepository;
pub use tenant_repo::TenantRepository;
