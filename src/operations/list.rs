use crate::error::Result;
use crate::projects::ProjectConfig;

/// Lines printed by `list`: `+ <name>` per project, or the whole config as
/// pretty JSON when verbose.
pub fn list_lines(config: &ProjectConfig, verbose: bool) -> Result<Vec<String>> {
    if verbose {
        return Ok(vec![config.to_pretty_json()?]);
    }

    Ok(config
        .names()
        .into_iter()
        .map(|name| format!("+ {}", name))
        .collect())
}
