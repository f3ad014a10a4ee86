//! Config command implementation.

use desk_lib::{DeskError, Result};

use crate::config::{self as desk_config, CliOverrides, Config};
use crate::format;

/// Print the effective configuration.
///
/// # Errors
///
/// Returns an error if a config layer is invalid or the output cannot be
/// serialized.
pub fn execute(json: bool, cli: &CliOverrides) -> Result<()> {
    let mut config = desk_config::load(cli)?;
    config.data_dir = dunce::simplified(&config.data_dir).to_path_buf();

    if json {
        return format::print_json(&config);
    }
    print!("{}", to_yaml(&config)?);
    Ok(())
}

fn to_yaml(config: &Config) -> Result<String> {
    serde_yaml::to_string(config).map_err(|e| DeskError::Config(e.to_string()))
}
