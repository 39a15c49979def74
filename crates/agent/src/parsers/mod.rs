//! Concrete output parser flavors.

mod react;
mod structured;

pub use react::ReactOutputParser;
pub use structured::StructuredOutputParser;
