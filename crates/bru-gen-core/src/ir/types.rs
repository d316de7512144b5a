use std::fmt;

use serde::Serialize;

/// Where one operation lands in the generated collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedIdentity {
    /// Folder (controller) the request file is grouped under.
    pub group_name: String,
    /// Request file name without extension; also the display name.
    pub file_name: String,
}

impl fmt::Display for ResolvedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group_name, self.file_name)
    }
}
