pub mod auth;
pub mod product;
pub mod user;
pub mod validation;
