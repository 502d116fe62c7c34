//! 页面视图

pub mod resources;
pub mod rule_form;
pub mod settings;
