//!
//! src/model/mod.rs
//! Model 层：应用状态定义
//!
//! Model 层是应用状态的 “唯一真相来源”，只被 Update 层修改、被 View 层读取。
//!
//! 有模块结构：
//!     src/model/mod.rs
//!         mod app;            // 主应用状态
//!         mod focus;          // 焦点状态（Navigation / Content）
//!         mod navigation;     // 导航栏状态
//!         mod page;           // 页面路由状态
//!
//!         pub mod state;      // 页面数据状态
//!
//!     与 page.rs 不同，state/ 存放各页面的业务数据：
//!         - Page 只标识当前处于哪个页面（Resources / RuleForm / Settings）；
//!         - State 保存列表、表单草稿、选中项、加载状态等。
//!
//!     列表与表单的业务状态机来自 mortar-portal-core（`ResourceList`、
//!     `ProxyRuleForm`），这里只补充终端特有的部分：搜索输入模式、
//!     表单光标位置、弹窗。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 待执行命令
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     App 持有一个 Command 队列。Update 层调用 `app.dispatch(cmd)` 请求 I/O，
//!     主循环在每轮结束时 `take_commands()` 并交给 Backend 执行。

mod app;
mod focus;
mod navigation;
mod page;
pub mod state;

pub use app::App;
pub use focus::FocusPanel;
pub use navigation::{NavItemId, NavigationState};
pub use page::Page;
