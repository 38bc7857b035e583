//! Staged Builder Declaration Model
//!
//! Pure data structures describing Java-like type declarations: the metadata a
//! builder is synthesized from and the declarations synthesis produces. No
//! synthesis logic and no file I/O live here.

pub mod decl;
pub mod expr;
pub mod file;
pub mod types;

// Re-export commonly used types at the crate root
pub use decl::*;
pub use expr::*;
pub use file::*;
pub use types::*;
