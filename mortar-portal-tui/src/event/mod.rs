//!
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘输入事件转换为 Message。
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // 事件处理器
//!         mod keymap;         // 快捷键映射
//!
//!     · poll_event      事件轮询，受 app.rs 调用，最长等待 timeout
//!     · handle_event    事件分发
//!
//!     handle_key_event 的判断顺序：
//!         - 有弹窗打开时，只交给 handle_modal_keys；
//!         - 全局 Alt / Ctrl 快捷键；
//!         - 列表页正在输入搜索词时，字符进入搜索框；
//!         - 焦点位于导航面板 → handle_navigation_keys；
//!         - 焦点位于内容面板 → 按当前页面分发（列表 / 表单 / 设置）。
//!
//!     表单页与搜索框会吃掉普通字符，因此单字母快捷键（q、/、n、d ...）
//!     只在列表和设置页生效，全局功能都另有 Alt 组合键。

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
