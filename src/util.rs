use std::fs;
use std::io;
use std::path::{Path, PathBuf};

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .try_init();
    });
}

const FORBIDDEN_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const MAX_DIR_NAME_CHARS: usize = 100;

/// Directory name for a channel: filesystem-special characters dropped, spaces
/// turned into underscores, lower-cased and cut to 100 characters.
pub fn sanitize_channel_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !FORBIDDEN_FILENAME_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_lowercase();
    let cut: String = cleaned.chars().take(MAX_DIR_NAME_CHARS).collect();
    if cut.is_empty() { "unknown_channel".to_string() } else { cut }
}

/// Append `.html` unless the name already ends with it.
pub fn ensure_html_extension(name: &str) -> PathBuf {
    if name.ends_with(".html") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.html"))
    }
}

fn tmp_sibling(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    dest.with_file_name(name)
}

/// Write `bytes` next to `dest` and promote the temp file into place.
/// If rename fails (e.g. across devices), fall back to copy + remove.
/// The temp file is removed again when promotion fails.
pub fn write_atomic(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = tmp_sibling(dest);
    fs::write(&tmp, bytes)?;
    if fs::rename(&tmp, dest).is_err() {
        let copied = fs::copy(&tmp, dest);
        let _ = fs::remove_file(&tmp);
        copied?;
    }
    Ok(())
}
