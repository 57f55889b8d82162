//! 設定管理を行うモジュール

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: I18nSettings,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: I18nSettings::default() }
    }

    /// ワークスペースから設定を読み込む
    ///
    /// 設定ファイルが無ければデフォルト値を使う
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<&Path>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = match workspace_root {
            Some(root) => loader::load_from_workspace(root)?.unwrap_or_default(),
            None => I18nSettings::default(),
        };

        self.update_settings(settings)
    }

    /// 明示的に指定された設定ファイルを読み込む
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings_file(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(config_path)?;
        self.update_settings(settings)
    }

    /// 設定を検証してから差し替える
    ///
    /// # Errors
    /// バリデーションエラーの場合は現在の設定を維持する
    pub fn update_settings(&mut self, new_settings: I18nSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated: {:?}", self.current_settings);

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.current_settings
    }
}
