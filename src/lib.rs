// Library for tests to access modules

pub mod aggregation;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod models;
pub mod reports;
pub mod runner;
