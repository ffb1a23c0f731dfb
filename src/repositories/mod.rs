pub mod investor_repository;

pub use investor_repository::{InvestorRepository, SeaOrmInvestorRepository};
