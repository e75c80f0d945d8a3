pub mod deal;
pub mod inquiry;
pub mod listing;
pub mod message;
pub mod payment;
pub mod user;
pub mod verification;
pub mod wholesale;
