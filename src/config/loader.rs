//! 設定ファイルの読み込み関数

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".i18n-swap.json";

/// `start` から親ディレクトリへ遡って設定ファイルを探す
fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|path| path.is_file())
}

/// 設定ファイルを1つ読み込んでパースする
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_file(config_path: &Path) -> Result<I18nSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// ワークスペースから設定を読み込む
///
/// `workspace_root` とその祖先ディレクトリから最も近い `.i18n-swap.json` を使う
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<I18nSettings>, ConfigError> {
    let Some(config_path) = find_config_file(workspace_root) else {
        tracing::debug!("Configuration file not found from: {:?}", workspace_root);
        return Ok(None);
    };

    load_from_file(&config_path).map(Some)
}
