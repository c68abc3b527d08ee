pub mod constants;
pub mod dashboard;
pub mod page;

pub use dashboard::{DashboardLayout, DashboardPage};
pub use page::Page;
