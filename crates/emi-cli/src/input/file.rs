use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Load a loan request from `--input`. Field checking is left to
/// `EmiInput::from_json` so errors name the offending field.
pub fn read_json_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("'{}' is not valid JSON: {}", resolved.display(), e))?;
    Ok(value)
}

/// Relative paths are taken from the working directory; the target must be a regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        let why = if resolved.exists() { "Not a file" } else { "File not found" };
        return Err(format!("{why}: {}", resolved.display()).into());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_request_file() {
        let err = read_json_value("no-such-loan-request.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }
}
