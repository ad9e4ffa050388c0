use std::io;
use std::path::Path;
use std::process::Command;

use crate::model::config::EditorConfig;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("could not launch editor '{command}': {source}")]
    Spawn { command: String, source: io::Error },
    #[error("editor '{command}' exited with status {code}")]
    Exit { command: String, code: i32 },
}

/// Pick the editor command: config, then $EDITOR, then $VISUAL, then the
/// first preferred editor on PATH, then the fallback.
pub fn resolve_editor(config: &EditorConfig) -> String {
    resolve_editor_with(
        config,
        std::env::var("EDITOR").ok(),
        std::env::var("VISUAL").ok(),
        on_path,
    )
}

fn resolve_editor_with(
    config: &EditorConfig,
    editor_env: Option<String>,
    visual_env: Option<String>,
    installed: impl Fn(&str) -> bool,
) -> String {
    let explicit = [config.command.clone(), editor_env, visual_env];
    if let Some(cmd) = explicit
        .into_iter()
        .flatten()
        .find(|c| !c.trim().is_empty())
    {
        return cmd;
    }
    config
        .preferred
        .iter()
        .find(|name| installed(name))
        .cloned()
        .unwrap_or_else(|| config.fallback.clone())
}

/// Whether an executable named `name` is on PATH
fn on_path(name: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| dir.join(name).is_file())
}

/// Run the editor on `path` and wait for it to exit.
///
/// The command goes through `sh -c` so values like `code --wait` work.
pub fn open_in_editor(command: &str, path: &Path) -> Result<(), EditorError> {
    tracing::debug!(editor = command, path = %path.display(), "launching editor");
    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{} \"$1\"", command))
        .arg("sh")
        .arg(path)
        .status()
        .map_err(|e| EditorError::Spawn {
            command: command.to_string(),
            source: e,
        })?;
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(EditorError::Exit {
            command: command.to_string(),
            code,
        }),
        // Killed by a signal: treat like a normal close
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn config_command_wins() {
        let config = EditorConfig {
            command: Some("hx".into()),
            ..Default::default()
        };
        let got = resolve_editor_with(&config, Some("vim".into()), None, |_| true);
        assert_eq!(got, "hx");
    }

    #[test]
    fn editor_env_then_visual() {
        let config = EditorConfig::default();
        assert_eq!(
            resolve_editor_with(&config, Some("emacs".into()), Some("code".into()), |_| true),
            "emacs"
        );
        assert_eq!(
            resolve_editor_with(&config, Some("  ".into()), Some("code".into()), |_| true),
            "code"
        );
    }

    #[test]
    fn first_installed_preferred_editor() {
        let config = EditorConfig::default();
        let got = resolve_editor_with(&config, None, None, |name| name == "vi");
        assert_eq!(got, "vi");
    }

    #[test]
    fn fallback_when_nothing_installed() {
        let config = EditorConfig::default();
        assert_eq!(resolve_editor_with(&config, None, None, |_| false), "nano");
    }

    #[test]
    fn runs_command_against_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("note with space.md");
        fs::write(&path, "").unwrap();
        open_in_editor("printf 'edited' >", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited");
    }

    #[test]
    fn failing_editor_reports_exit_code() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("note.md");
        let err = open_in_editor("exit 3;", &path).unwrap_err();
        assert!(matches!(err, EditorError::Exit { code: 3, .. }));
    }
}
