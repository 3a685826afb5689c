pub mod capture;
pub mod classifier;
pub mod pipeline;
pub mod resolver;

pub use classifier::ClassifiedFrame;
pub use pipeline::Accountant;
pub use resolver::{Attribution, Direction, OwnershipResolver};
