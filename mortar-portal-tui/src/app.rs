//!
//! app.rs
//! 应用主循环
//!
//! 启动时 App 处于以下状态：
//!
//! App {
//!     should_quit: false,
//!     focus: FocusPanel::Content,                     // 焦点在内容区
//!     navigation: [Resources, New Proxy Rule, Settings], selected = 0,
//!     current_page: Page::Resources,
//!     resources.list: Loading,                        // 已排队 Command::LoadResources
//!     rule_form: None,
//! }
//!
//! 主循环大约每 100 ms 执行一次：
//! loop {
//!     执行 app 中排队的 Command                       // Backend 在 tokio 上运行
//!     terminal.draw(|f| view::render(&app, f))        // 渲染 UI
//!     if app.should_quit { break }
//!     if let Some(event) = poll_event() {             // 最多等待 100ms
//!         let msg = handle_event(event, &app);
//!         update::update(&mut app, msg);
//!     }
//!     while let Ok(result) = events.try_recv() {      // 收取已完成的后台结果
//!         update::update(&mut app, AppMessage::Backend(result));
//!     }
//! }

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::backend::Backend;
use crate::event;
use crate::message::{AppMessage, BackendEvent};
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

const TICK: Duration = Duration::from_millis(100);

/// 运行应用主循环
pub fn run(
    terminal: &mut Term,
    app: &mut App,
    backend: &Backend,
    events: &mut UnboundedReceiver<BackendEvent>,
) -> Result<()> {
    loop {
        // 1. 执行 Update 层排队的请求
        for command in app.take_commands() {
            backend.execute(command);
        }

        // 2. 渲染 UI
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        // 3. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 4. 轮询按键（100ms 超时）
        if let Some(event) = event::poll_event(TICK)? {
            let msg = event::handle_event(event, app);
            update::update(app, msg);
        }

        // 5. 收取后台结果
        while let Ok(result) = events.try_recv() {
            update::update(app, AppMessage::Backend(result));
        }
    }

    Ok(())
}
