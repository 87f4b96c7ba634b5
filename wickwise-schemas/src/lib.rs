pub mod compatibility;
pub mod design;
pub mod environment;
pub mod file_formats;
pub mod material;
pub mod particle;
pub mod results;
pub mod sample;
pub mod template;
