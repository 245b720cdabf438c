pub mod get_dashboard;

pub use get_dashboard::{DashboardResponse, GetDashboardError, GetDashboardQuery};
