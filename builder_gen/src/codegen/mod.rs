pub mod java;

pub use java::{JavaCodeGenerator, JavaCodeGeneratorOptions};

pub const OUTPUT_DIR: &str = "generated";
