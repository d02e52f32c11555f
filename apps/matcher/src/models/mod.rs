pub mod candidate;
pub mod extracted;
pub mod job;
pub mod lenient;
pub mod links;
