pub mod admin;
pub mod api;
pub mod auth;
pub mod election;
pub mod party;
pub mod results;
pub mod timestamp;
pub mod vote;
pub mod voter;
