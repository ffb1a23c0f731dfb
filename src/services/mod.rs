pub mod investor_service;

pub use investor_service::{CommitmentView, InvestorCommitments, InvestorService, InvestorSummary};
