// Export all route modules
pub mod investors;

pub use investors::*;
