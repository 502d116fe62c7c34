//!
//! src/backend/mod.rs
//! Backend 层：执行 I/O
//!
//! Update 层只产生 `Command`，从不等待网络。Backend 把每个 Command
//! 放到 tokio 运行时上执行，结果作为 `BackendEvent` 通过通道送回主循环：
//!
//!     Update ──dispatch──▶ App.commands
//!                              │ take_commands()（app.rs）
//!                              ▼
//!                         Backend::execute ──spawn──▶ mortar-portal-core 服务
//!                                                          │
//!     Update ◀──AppMessage::Backend── 主循环 try_recv ◀────┘ BackendEvent
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod config_service;     // 配置文件读写
//!
//! 请求不会被取消：用户离开页面后结果照常送回，由 Update 层决定是否丢弃。

mod config_service;

pub use config_service::{AppConfig, ConfigService, JsonConfigService, API_URL_ENV};

use std::sync::Arc;

use mortar_portal_core::services::{ProxyRuleService, ResourceService};
use mortar_portal_core::ServiceContext;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::message::{BackendEvent, Command};
use crate::model::state::Theme;

/// 后台执行器
pub struct Backend {
    handle: Handle,
    resources: Arc<ResourceService>,
    rules: Arc<ProxyRuleService>,
    config: Arc<dyn ConfigService>,
    tx: UnboundedSender<BackendEvent>,
}

impl Backend {
    pub fn new(
        handle: Handle,
        ctx: Arc<ServiceContext>,
        config: Arc<dyn ConfigService>,
        tx: UnboundedSender<BackendEvent>,
    ) -> Self {
        Self {
            handle,
            resources: Arc::new(ResourceService::new(ctx.clone())),
            rules: Arc::new(ProxyRuleService::new(ctx)),
            config,
            tx,
        }
    }

    /// 在运行时上启动命令，立即返回
    pub fn execute(&self, command: Command) {
        log::debug!("Executing {command:?}");
        let tx = self.tx.clone();

        match command {
            Command::LoadResources => {
                let resources = self.resources.clone();
                self.handle.spawn(async move {
                    let result = resources.load_snapshot().await;
                    send(&tx, BackendEvent::ResourcesLoaded(result));
                });
            }

            Command::LoadRule { form_id, name } => {
                let rules = self.rules.clone();
                self.handle.spawn(async move {
                    let result = rules.fetch_rule(&name).await;
                    send(&tx, BackendEvent::RuleLoaded { form_id, result });
                });
            }

            Command::LoadExistingRules { form_id } => {
                let rules = self.rules.clone();
                self.handle.spawn(async move {
                    let existing = rules.fetch_existing().await;
                    send(
                        &tx,
                        BackendEvent::ExistingRulesLoaded {
                            form_id,
                            rules: existing,
                        },
                    );
                });
            }

            Command::SubmitRule { form_id, request } => {
                let rules = self.rules.clone();
                self.handle.spawn(async move {
                    let result = rules.submit(request).await;
                    send(&tx, BackendEvent::RuleSaved { form_id, result });
                });
            }

            Command::DeleteRule { name } => {
                let resources = self.resources.clone();
                self.handle.spawn(async move {
                    let result = resources.delete_and_reload(&name).await;
                    send(&tx, BackendEvent::RuleDeleted { name, result });
                });
            }

            Command::SaveConfig { theme } => {
                let config = self.config.clone();
                self.handle.spawn_blocking(move || {
                    let result = save_theme(config.as_ref(), theme).map_err(|e| {
                        log::warn!("Saving settings failed: {e:#}");
                        format!("{e:#}")
                    });
                    send(&tx, BackendEvent::ConfigSaved(result));
                });
            }
        }
    }
}

/// 只修改主题，文件里的其他配置保持原样（环境变量覆盖的地址不会被写入）
fn save_theme(service: &dyn ConfigService, theme: Theme) -> anyhow::Result<()> {
    let mut config = service.load().unwrap_or_else(|e| {
        log::warn!("Replacing unreadable config: {e:#}");
        AppConfig::default()
    });
    config.theme = theme;
    service.save(&config)
}

fn send(tx: &UnboundedSender<BackendEvent>, event: BackendEvent) {
    // 主循环已退出时接收端被丢弃，结果无人关心
    if tx.send(event).is_err() {
        log::debug!("Backend result dropped: UI has shut down");
    }
}
