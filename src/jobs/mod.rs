pub mod initial_load;

pub use initial_load::{load_initial_data, LoadOutcome};
