// ============================================================================
// 可注入的日志接口
// 实体管理器不直接依赖全局输出，而是持有一个 Logger；
// 默认转发到 `log` 门面的全局 logger，测试中可注入捕获实现
// ============================================================================

use log::{Level, Log, Metadata, Record};
use std::fmt;
use std::sync::Arc;

/// 实体管理层使用的日志 target
pub const LOG_TARGET: &str = "brewcode::entity";

/// 转发到 `log::logger()` 的默认实现
struct GlobalLog;

impl Log for GlobalLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// 注入到各实体管理器中的日志句柄
#[derive(Clone)]
pub struct Logger {
    inner: Arc<dyn Log>,
}

impl Logger {
    /// 使用指定的 `log::Log` 实现
    pub fn new(inner: Arc<dyn Log>) -> Self {
        Logger { inner }
    }

    /// 转发到进程全局 logger（由宿主应用安装）
    pub fn global() -> Self {
        Logger {
            inner: Arc::new(GlobalLog),
        }
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(LOG_TARGET).build();
        if !self.inner.enabled(&metadata) {
            return;
        }
        self.inner.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(LOG_TARGET)
                .module_path_static(Some(module_path!()))
                .build(),
        );
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::global()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

// ============================================================================
// 测试辅助：捕获日志
// ============================================================================

/// 把日志记录收集到内存中，供单元测试断言
#[cfg(test)]
#[derive(Default)]
pub struct CaptureLog {
    pub lines: std::sync::Mutex<Vec<(Level, String)>>,
}

#[cfg(test)]
impl CaptureLog {
    /// 返回指定级别的所有消息
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

#[cfg(test)]
impl Log for CaptureLog {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}
