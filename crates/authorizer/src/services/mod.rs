//! Use-case services: authentication and decision building.

pub mod authentication;
pub mod decision;

pub use authentication::AuthenticationService;
pub use decision::DecisionService;
