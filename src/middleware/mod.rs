pub mod auth;
pub mod authorization;
pub mod real_ip;
