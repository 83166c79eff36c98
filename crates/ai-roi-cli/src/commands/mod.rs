pub mod projection;
pub mod scenarios;
