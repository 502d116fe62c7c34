//! Mortar Portal TUI
//!
//! 终端中的代理规则控制台：浏览 proxy rule 与 ingress、创建/编辑/删除 proxy rule。
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 在 tokio 上执行请求 (`backend/`)
//!
//! main.rs 的执行顺序：
//!
//!     init_logging()              // 日志写入文件，终端留给 UI
//!     加载配置 + 环境变量覆盖
//!     创建 tokio 运行时、PortalClient、Backend
//!     init_terminal()
//!     app::run()                  // 主循环
//!     restore_terminal()          // 无论成功与否，都恢复终端

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use mortar_portal_client::PortalClient;
use mortar_portal_core::ServiceContext;
use tokio::sync::mpsc::unbounded_channel;

use backend::{AppConfig, Backend, ConfigService, JsonConfigService, API_URL_ENV};
use model::state::SettingsState;
use util::{init_logging, init_terminal, restore_terminal};

fn main() -> Result<()> {
    // 1. 日志
    let log_path = init_logging()?;
    log::info!("Starting Mortar Portal TUI v{}", env!("CARGO_PKG_VERSION"));

    // 2. 配置：文件损坏时使用默认值，环境变量可覆盖 API 地址
    let config_service = Arc::new(JsonConfigService::default_location());
    let config = config_service
        .load()
        .unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config: {e:#}");
            AppConfig::default()
        })
        .with_api_url_override(std::env::var(API_URL_ENV).ok());
    log::info!("API endpoint: {}", config.api_base_url);

    // 3. 后台运行时和服务
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let client = PortalClient::new(&config.api_base_url)
        .with_context(|| format!("invalid API endpoint {}", config.api_base_url))?;
    let ctx = Arc::new(ServiceContext::new(Arc::new(client)));
    let (tx, mut events) = unbounded_channel();
    let backend = Backend::new(runtime.handle().clone(), ctx, config_service.clone(), tx);

    view::theme::set_theme(config.theme);

    let settings = SettingsState::new(config.theme, config.api_base_url.clone()).with_paths(
        config_service
            .location()
            .map(|p| p.display().to_string()),
        log_path.map(|p| p.display().to_string()),
    );
    let mut app = model::App::new(settings);

    // 4. 终端
    let mut terminal = init_terminal()?;

    // 5. 运行主循环
    let result = app::run(&mut terminal, &mut app, &backend, &mut events);

    // 6. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    // 未完成的请求不再等待
    drop(backend);
    runtime.shutdown_timeout(Duration::from_millis(500));
    log::info!("Mortar Portal TUI exited");

    result
}
