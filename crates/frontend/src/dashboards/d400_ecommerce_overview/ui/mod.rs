pub mod dashboard;
pub mod sections;

pub use dashboard::EcommerceOverviewDashboard;
