//! Configuration file editor command.

use crate::config::{get_config_path, WardwatchConfig};
use std::process::Command;

/// Opens the wardwatch configuration file in the user's preferred editor.
///
/// The file is created with defaults first if it does not exist. Editors are tried
/// in order: `$EDITOR`, nano, vi. After editing, the file is parsed again so that
/// mistakes are reported right away rather than on the next dashboard start.
///
/// # Errors
/// - If no editor can be found or executed
/// - If the edited file is not valid configuration
pub fn handle_config() -> anyhow::Result<()> {
    let config_path = get_config_path()?;
    WardwatchConfig::load_from(&config_path)?;

    tracing::info!("Opening config file: {}", config_path.display());

    let editor = find_editor()?;
    tracing::debug!("Using editor: {}", editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to open editor '{editor}': {e}. Make sure the editor is installed and accessible."
            )
        })?;

    if !status.success() {
        return Err(anyhow::anyhow!(
            "Editor exited with error code: {}",
            status.code().unwrap_or(-1)
        ));
    }

    WardwatchConfig::load_from(&config_path)
        .map_err(|e| anyhow::anyhow!("Config file is invalid after editing: {e}"))?;

    tracing::info!("Config file edited successfully");
    Ok(())
}

fn find_editor() -> anyhow::Result<String> {
    if let Ok(editor) = std::env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    ["nano", "vi"]
        .iter()
        .find(|editor| is_editor_available(editor))
        .map(|editor| editor.to_string())
        .ok_or_else(|| anyhow::anyhow!("No editor found. Please set the $EDITOR environment variable."))
}

/// Checks if an editor is available in the system PATH.
fn is_editor_available(editor: &str) -> bool {
    Command::new("which")
        .arg(editor)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
