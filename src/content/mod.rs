//! Canned content.
//!
//! - **`payloads`**: the static byte tables, aliases and blocked extensions
//! - **`suffix`**: request target to canonical extension
//! - **`table`**: extension lookup with the HTML fallback and the
//!   regenerated `version` entry

pub mod payloads;
pub mod suffix;
pub mod table;

pub use suffix::{InvalidUrl, resolve};
pub use table::{BuildInfo, ContentTable, NullFile};
