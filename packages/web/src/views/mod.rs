mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod dashboard_layout;
pub use dashboard_layout::DashboardLayout;

mod dashboard;
pub use dashboard::Dashboard;

mod members;
pub use members::Members;

mod not_found;
pub use not_found::PageNotFound;
