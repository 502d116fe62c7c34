//!
//! src/message/mod.rs
//! Message 层：事件消息定义
//!
//! 作为 Event → Update 之间的桥梁。
//! 键盘输入由 Event 层翻译成 `AppMessage`，后台请求的结果由主循环包装成
//! `AppMessage::Backend`，两者都只交给 Update 层处理。
//!
//! 有模块结构：
//!     src/message/mod.rs
//!         mod app;            // 主消息 AppMessage
//!         mod backend;        // Command（Update → Backend）与 BackendEvent（Backend → Update）
//!         mod content;        // 资源列表页消息
//!         mod form;           // 规则表单页消息
//!         mod modal;          // 弹窗消息
//!         mod navigation;     // 导航栏消息
//!
//! Update 层不直接做 I/O：需要请求 API 或写配置时，它把一个 `Command`
//! 放进 `App` 的待办队列，由主循环交给 Backend 执行；执行结果再以
//! `BackendEvent` 的形式回到 Update。

mod app;
mod backend;
mod content;
mod form;
mod modal;
mod navigation;

pub use app::AppMessage;
pub use backend::{BackendEvent, Command};
pub use content::ContentMessage;
pub use form::FormMessage;
pub use modal::ModalMessage;
pub use navigation::NavigationMessage;
