pub mod queries;
pub mod routes;

pub use queries::{DashboardResponse, GetDashboardError, GetDashboardQuery};

pub use routes::dashboard_routes;
