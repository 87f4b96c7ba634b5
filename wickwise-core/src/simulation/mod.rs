pub mod builder;
pub mod engine;
pub mod flow;
pub mod scoring;
pub mod stability;
