//! 页面状态模块
//!
//! 定义各个页面的状态数据结构

mod modal;
mod resources;
mod rule_form;
mod settings;

pub use modal::{DeleteFocus, Modal, ModalState};
pub use resources::ResourcesState;
pub use rule_form::{FormSlot, RuleFormState};
pub use settings::{SettingItem, SettingsState, Theme};
