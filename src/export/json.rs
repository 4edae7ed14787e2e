//! JSON export of unwrap results.

use crate::error::Result;
use crate::mesh_output::UnwrapOutput;

/// Serialize an unwrap result, one object per mesh.
pub fn export_json(output: &UnwrapOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}
