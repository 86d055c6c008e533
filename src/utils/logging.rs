// 日志工具模块
//
// 封装 flexi_logger 的初始化和关闭操作，确保异步日志正确 flush

use crate::config::LogConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode};
use parking_lot::Mutex;

/// 全局日志句柄，用于程序退出时 flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = parking_lot::const_mutex(None);

/// 初始化日志系统
///
/// `to_file` 为 false 时输出到 stderr，否则按大小轮转写入 `dir/file`
///
/// # Examples
/// ```no_run
/// use actionperm::config::LogConfig;
/// use actionperm::utils::logging;
///
/// logging::init(&LogConfig::default()).expect("日志初始化失败");
/// ```
pub fn init(config: &LogConfig) -> Result<(), FlexiLoggerError> {
    let mut logger = Logger::try_with_str(&config.level)?;
    if config.to_file {
        logger = logger
            .log_to_file(
                FileSpec::default()
                    .basename(&config.file)
                    .directory(&config.dir),
            )
            .rotate(
                Criterion::Size(config.max_file_size),
                Naming::Numbers,
                Cleanup::KeepLogFiles(config.max_files),
            )
            .append();
    }
    let handle = logger.write_mode(WriteMode::Async).start()?;

    // 保存句柄供后续 flush 使用
    *LOGGER_HANDLE.lock() = Some(handle);

    if config.to_file {
        log::info!("日志系统初始化完成: {}/{}", config.dir, config.file);
    } else {
        log::info!("日志系统初始化完成: stderr");
    }
    Ok(())
}

/// 刷新并关闭日志系统
///
/// 在程序退出前调用，确保所有异步日志都已写入
pub fn shutdown() {
    if let Some(handle) = LOGGER_HANDLE.lock().take() {
        handle.flush();
        // handle 在这里被 drop，会等待异步线程完成
    }
}

/// 检查日志系统是否已初始化
pub fn is_initialized() -> bool {
    LOGGER_HANDLE.lock().is_some()
}
