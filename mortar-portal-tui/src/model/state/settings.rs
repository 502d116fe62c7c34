//! 设置页面状态

use serde::{Deserialize, Serialize};

/// 主题枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// 只有两个选项，向前和向后切换相同
    pub fn next(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    /// 标题栏上的主题指示
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☾",
            Theme::Light => "☀",
        }
    }
}

/// 设置项枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingItem {
    Theme,
    ApiEndpoint,
}

impl SettingItem {
    pub fn all() -> &'static [SettingItem] {
        &[SettingItem::Theme, SettingItem::ApiEndpoint]
    }

    pub fn from_index(index: usize) -> Option<SettingItem> {
        Self::all().get(index).copied()
    }

    /// 只读项只展示，不能切换
    pub fn is_read_only(self) -> bool {
        matches!(self, SettingItem::ApiEndpoint)
    }
}

/// 设置页面状态
#[derive(Debug, Default)]
pub struct SettingsState {
    /// 当前选中的设置项索引
    pub selected_index: usize,
    /// 当前主题
    pub theme: Theme,
    /// 生效中的 API 地址（配置文件或环境变量）
    pub api_base_url: String,
    /// 配置文件位置
    pub config_path: Option<String>,
    /// 日志文件位置
    pub log_path: Option<String>,
}

impl SettingsState {
    pub fn new(theme: Theme, api_base_url: impl Into<String>) -> Self {
        Self {
            theme,
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_paths(mut self, config_path: Option<String>, log_path: Option<String>) -> Self {
        self.config_path = config_path;
        self.log_path = log_path;
        self
    }

    pub fn item_count(&self) -> usize {
        SettingItem::all().len()
    }

    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = self.item_count() - 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected_index < self.item_count() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
    }

    pub fn current_item(&self) -> Option<SettingItem> {
        SettingItem::from_index(self.selected_index)
    }
}
