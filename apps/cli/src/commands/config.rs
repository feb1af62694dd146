//! Shows the effective configuration and optionally writes it to disk.

use lnf_client::ClientConfig;

use crate::commands::print_json;
use crate::error::{CliError, CliResult, ErrorCode};
use crate::state::AppState;

pub fn run(state: &AppState, save: bool, json: bool) -> CliResult<()> {
    if json {
        print_json(&state.config)?;
    } else {
        println!("{}", render_toml(&state.config)?);
    }

    if save {
        state.config.save(state.config_path.clone())?;
        let path = state
            .config_path
            .clone()
            .or_else(ClientConfig::default_config_path);
        if let Some(path) = path {
            eprintln!("Saved to {}", path.display());
        }
    }
    Ok(())
}

fn render_toml(config: &ClientConfig) -> CliResult<String> {
    toml::to_string_pretty(config)
        .map(|text| text.trim_end().to_string())
        .map_err(|e| CliError::new(ErrorCode::Internal, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toml_has_both_sections() {
        let text = render_toml(&ClientConfig::default()).unwrap();
        assert!(text.contains("[api]"));
        assert!(text.contains("base_url = \"http://localhost:8080\""));
        assert!(text.contains("timeout_secs = 30"));
    }
}
