//! 日志初始化
//!
//! TUI 占用整个终端，日志只能写入文件：
//! `<data_local_dir>/mortar-portal/mortar-portal.log`。
//! 级别由 `MORTAR_PORTAL_LOG` 控制（EnvFilter 语法），默认 `info`。

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志级别环境变量
pub const LOG_ENV: &str = "MORTAR_PORTAL_LOG";

/// 日志文件位置
fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("mortar-portal").join("mortar-portal.log"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))
}

/// 安装全局日志订阅者，`log` 宏的输出也会转发到这里
///
/// 返回实际使用的日志文件；无法确定数据目录时不记录日志。
pub fn init_logging() -> Result<Option<PathBuf>> {
    let Some(path) = log_file_path() else {
        return Ok(None);
    };
    let file = open_log_file(&path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .context("installing log subscriber")?;

    Ok(Some(path))
}
