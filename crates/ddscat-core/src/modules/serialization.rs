use std::fs;
use std::io;
use std::path::Path;

/// Canonicalize to `\n` endings with a final newline, so repeated writes of
/// the same content are byte-identical regardless of its origin.
pub fn normalize_newlines(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_file(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, normalize_newlines(content))
}

/// Best-effort executable bit. Submission scripts stay usable through an
/// explicit interpreter even when this fails, so errors are discarded.
#[cfg(unix)]
pub fn mark_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::metadata(path).and_then(|metadata| {
        let mut permissions = metadata.permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        fs::set_permissions(path, permissions)
    });
}

#[cfg(not(unix))]
pub fn mark_executable(_path: &Path) {}
