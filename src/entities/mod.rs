pub mod commitment;
pub mod investor;

pub use commitment::Entity as Commitment;
pub use investor::Entity as Investor;
