pub mod deal;
pub mod inquiry;
pub mod listing;
pub mod message;
pub mod verification;
pub mod wholesale;
