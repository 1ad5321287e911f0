//! Trade-desk domain logic: stores, pricing and the mock trade services.

pub mod app_state;
pub mod carbon;
pub mod cart;
pub mod catalog;
pub mod classification;
pub mod compliance;
pub mod currency;
pub mod landed_cost;
pub mod rates;
pub mod region;
pub mod risk;
pub mod sanctions;
pub mod session;

pub use app_state::{AppState, PersistedState};
pub use catalog::Offering;
pub use cart::{Cart, CartItem, CartTotals, TAX_RATE};
pub use classification::{classify, Classification, MatchKind};
pub use currency::Currency;
pub use rates::{compare_rates, RateComparison, RateQuote, RateRequest, TransportMode};
pub use risk::{risk_map, simulate, RiskInput, RiskLevel, RiskReport, Scenario, Severity};
pub use sanctions::{screen, ScreeningRequest, ScreeningResult, ScreeningStatus};
pub use session::User;
