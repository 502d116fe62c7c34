//!
//! src/view/mod.rs
//! View 层：UI 渲染
//!
//! View 层只读取 Model，不修改任何状态。
//!
//! 有模块结构：
//!     src/view/mod.rs
//!         mod components;     // 导航栏、状态栏、弹窗
//!         mod layout;         // 主布局
//!         mod pages;          // 资源列表、规则表单、设置
//!         pub mod theme;      // 主题颜色（update 层切换主题时也会用到）

mod components;
mod layout;
mod pages;
pub mod theme;

pub use layout::render;
