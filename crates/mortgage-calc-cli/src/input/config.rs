use mortgage_calc_core::programs::ProgramConfig;
use tracing::debug;

use super::file;

/// Load program rules from `path`, or the built-in defaults when absent.
///
/// Files only need the keys they override; everything else keeps its default.
pub fn load_program_config(path: Option<&str>) -> Result<ProgramConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            let config: ProgramConfig = file::read_json_or_yaml(path)?;
            debug!(path, "loaded program config");
            config
        }
        None => ProgramConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
