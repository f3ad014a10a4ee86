//! Version command implementation.

use desk_lib::Result;

use crate::format::{self, VersionOutput};

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if json {
        return format::print_json(&VersionOutput { version, build });
    }

    println!("desk version {version} ({build})");
    Ok(())
}
