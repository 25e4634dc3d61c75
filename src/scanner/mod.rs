//! Inline-import scanning: third-party modules inferred from source files.

mod imports;
mod probe;

pub use imports::scan_inline_imports;
pub use probe::ModuleProbe;
