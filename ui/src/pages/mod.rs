pub mod dashboard;
pub mod edit_house;
pub mod login;
pub mod not_found;
pub mod profile;

pub use dashboard::DashboardPage;
pub use edit_house::EditHousePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
