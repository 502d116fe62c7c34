//!
//! src/util/mod.rs
//! Util 层：基础设施
//!
//! 与业务无关的代码：终端的初始化与恢复、日志文件。
//!
//! 有模块结构：
//!     src/util/mod.rs
//!         mod logging;        // tracing-subscriber 写入日志文件
//!         mod terminal;       // 终端初始化和恢复
//!
//!     · Raw Mode：关闭行缓冲和回显，每个按键立即送达
//!     · Alternate Screen：在备用屏幕中运行，退出后恢复原有终端内容
//!
//!     main.rs 中 restore_terminal 紧跟在 app::run 之后执行，
//!     即使主循环返回错误，也会先恢复终端再返回。

mod logging;
mod terminal;

pub use logging::init_logging;
pub use terminal::{init_terminal, restore_terminal, Term};
