pub mod access;
pub mod payouts;
pub mod trainers;
