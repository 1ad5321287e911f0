pub mod account;
pub mod carbon;
pub mod cart;
pub mod classifier;
pub mod compliance;
pub mod home;
pub mod landed_cost;
pub mod not_found;
pub mod rates;
pub mod risk;
pub mod settings;

pub use account::AccountPage;
pub use carbon::CarbonPage;
pub use cart::CartPage;
pub use classifier::ClassifierPage;
pub use compliance::CompliancePage;
pub use home::HomePage;
pub use landed_cost::LandedCostPage;
pub use not_found::NotFoundPage;
pub use rates::RatesPage;
pub use risk::RiskPage;
pub use settings::SettingsPage;
