//! The integration descriptor served to the chat platform.

mod manifest;

pub use manifest::{builtin_manifest, load_manifest, target_url};
