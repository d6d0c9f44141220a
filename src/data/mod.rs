pub mod config;
pub mod countries;
pub mod scores;
pub mod users;
