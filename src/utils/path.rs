use std::path::{Path, PathBuf};

/// Expand a leading tilde (`~` or `~/...`) against the current user's home.
///
/// Returns `None` when the path starts with `~` but no home directory
/// can be determined.
///
/// # Examples
///
/// ```
/// use syncode::utils::path::expand_tilde;
///
/// let path = expand_tilde("/absolute/path").unwrap();
/// assert_eq!(path.to_str(), Some("/absolute/path"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    if !starts_with_tilde(path) {
        return Some(path.to_path_buf());
    }
    let home = dirs::home_dir()?;
    Some(expand_tilde_with(path, &home))
}

/// Expand a leading tilde against an explicit home directory.
///
/// `~user/...` forms are not expanded: only the current user's home is known.
pub fn expand_tilde_with<P: AsRef<Path>>(path: P, home: &Path) -> PathBuf {
    let path = path.as_ref();
    let Some(path_str) = path.to_str() else {
        return path.to_path_buf();
    };

    if path_str == "~" {
        return home.to_path_buf();
    }

    match path_str
        .strip_prefix("~/")
        .or_else(|| path_str.strip_prefix("~\\"))
    {
        Some(rest) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => path.to_path_buf(),
    }
}

/// Replace the home directory prefix with `~` for display
pub fn contract_home(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

fn starts_with_tilde(path: &Path) -> bool {
    path.to_str().is_some_and(|s| s.starts_with('~'))
}
