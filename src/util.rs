use crate::error::{AppResult, MapError};
use crate::hardening::{ALLOW_SYMLINKS, MAX_FILES_PER_IMPORT, MAX_FILE_BYTES, MAX_TOTAL_BYTES};
use std::fs;
use std::path::{Path, PathBuf};

pub fn str_is_truthy(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1" | "on")
}

/// Case-insensitive equality that also folds non-ASCII letters ("CAFÉ" == "café").
pub fn eq_caseless(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Quotes a token containing whitespace so it survives being joined with spaces.
pub fn quote_token(token: &str) -> String {
    if token.chars().any(char::is_whitespace) {
        format!("\"{}\"", token.replace('"', "\\\""))
    } else {
        token.to_string()
    }
}

pub fn list_yaml_files_guarded(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut total = 0usize;

    for e in fs::read_dir(dir)? {
        let e = e?;
        let p = e.path();
        if !p.is_file() { continue; }
        let name = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if !(name.ends_with(".yml") || name.ends_with(".yaml")) { continue; }

        if !ALLOW_SYMLINKS {
            let md = fs::symlink_metadata(&p)?;
            if md.file_type().is_symlink() { // skip symlinked files
                continue;
            }
        }
        let len = fs::metadata(&p)?.len() as usize;
        if len > MAX_FILE_BYTES { return Err(MapError::FileTooLarge { path: p, bytes: len }); }
        total = total.saturating_add(len);
        if total > MAX_TOTAL_BYTES { return Err(MapError::LimitExceeded("total size")); }

        files.push(p);
        if files.len() > MAX_FILES_PER_IMPORT { return Err(MapError::LimitExceeded("file count")); }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caseless_folds_unicode() {
        assert!(eq_caseless("CAFÉ NOIR", "Café Noir"));
        assert!(eq_caseless("élégant.", "ÉLÉGANT."));
        assert!(!eq_caseless("Café", "Cafe"));
    }

    #[test]
    fn truthy_values() {
        assert!(str_is_truthy("1"));
        assert!(str_is_truthy(" Yes "));
        assert!(!str_is_truthy("0"));
        assert!(!str_is_truthy(""));
    }

    #[test]
    fn quoting() {
        assert_eq!(quote_token("e"), "e");
        assert_eq!(quote_token("enter portal"), "\"enter portal\"");
    }
}
