use directories::BaseDirs;
use std::path::PathBuf;

/// Application config directory (OS standard)
/// Linux: ~/.config/SnapTrans
/// macOS: ~/Library/Application Support/SnapTrans
/// Windows: %APPDATA%\\SnapTrans
pub fn app_config_dir() -> PathBuf {
    if let Some(base) = BaseDirs::new() {
        return base.config_dir().join("SnapTrans");
    }
    // Fallback: current working directory
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
