//! 日志初始化
//!
//! 使用 `tracing` 作为日志门面。wasm32 下事件被格式化后写入浏览器 console，
//! 其他平台（测试）写入 stdout。

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::AppConfig;

/// 将一条格式化好的日志缓冲起来，drop 时一次性写入 console
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }

        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&line.into());

        #[cfg(not(target_arch = "wasm32"))]
        println!("{}", line);
    }
}

#[derive(Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 安装全局 subscriber，重复调用时忽略
pub fn init(config: &AppConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_filter(&config.log_filter))
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .try_init();

    if result.is_ok() {
        tracing::debug!(api = %config.api_base_url, "logging initialised");
    }
}
