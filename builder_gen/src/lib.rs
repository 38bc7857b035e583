//! Staged builder synthesis.
//!
//! Given the fields and methods of a type, generates a chain of stage interfaces
//! that forces required fields to be set in declaration order before the optional
//! stage and `build()` become reachable, together with the builder class, the
//! constructor and the static factory that tie it to the type.

pub mod cmds;
pub mod codegen;
pub mod config;
pub mod decl;
pub mod error;
pub mod model;
pub mod naming;
pub mod spec;
pub mod synth;

pub use error::SynthesisError;
pub use spec::BuilderSpec;
pub use synth::{handle_builder, handle_extension, synthesize, SynthesisReport};
