mod bar;
mod security;
mod ticker;
mod timestamp;

pub use bar::{Bar, PriceSeries};
pub use security::{Security, SecurityId};
pub use ticker::Ticker;
pub use timestamp::UtcDateTime;
