//! Directory-to-item relationships.

use serde::{Deserialize, Serialize};
use strum::Display;

/// How a directory relates to another item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Relationship {
    /// The item lives somewhere beneath the directory.
    Contains,
    /// The item is the directory itself.
    Same,
    /// Neither of the above.
    Other,
}
