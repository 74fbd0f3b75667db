pub mod config;
pub mod offers;
pub mod token;

pub use config::Config;
pub use offers::OfferClient;
pub use token::{Clock, Credential, SystemClock, TokenManager};
