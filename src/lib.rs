pub mod api;
pub mod config;
pub mod formulary;
pub mod nim;
pub mod openfda;
pub mod report;
