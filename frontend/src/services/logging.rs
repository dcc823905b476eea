use gloo::net::http::Request;
use shared::LogRequest;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub component: String,
    pub message: String,
}

/// Destination for log records
pub trait LogSink {
    fn write(&self, record: &LogRecord);
}

/// Writes to the browser console
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, record: &LogRecord) {
        let line = format!("[{}] {}", record.component, record.message);
        match record.level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }
}

/// Ships records to the backend log endpoint. Delivery failures are dropped
/// so that logging never logs about itself.
pub struct RemoteSink {
    endpoint: String,
}

impl RemoteSink {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/api/logs", base_url.trim_end_matches('/')),
        }
    }
}

impl LogSink for RemoteSink {
    fn write(&self, record: &LogRecord) {
        let request = LogRequest {
            level: record.level.as_str().to_string(),
            message: record.message.clone(),
            component: Some(record.component.clone()),
        };
        let endpoint = self.endpoint.clone();

        // Send log asynchronously without blocking
        spawn_local(async move {
            if let Ok(request) = Request::post(&endpoint).json(&request) {
                let _ = request.send().await;
            }
        });
    }
}

/// Keeps records in memory; handy for tests and debug overlays
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Rc<RefCell<Vec<LogRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.borrow().clone()
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &LogRecord) {
        self.records.borrow_mut().push(record.clone());
    }
}

/// Component-tagged logger fanning out to every configured sink
#[derive(Clone)]
pub struct Logger {
    component: Rc<str>,
    min_level: LogLevel,
    sinks: Rc<Vec<Box<dyn LogSink>>>,
}

impl Logger {
    /// Console + remote sinks, configured from `AppConfig`
    pub fn new(component: &str) -> Self {
        let config = crate::config::AppConfig::from_env();
        let mut sinks: Vec<Box<dyn LogSink>> = vec![Box::new(ConsoleSink)];
        if config.remote_logging {
            sinks.push(Box::new(RemoteSink::new(&config.api_base_url)));
        }
        Self::with_sinks(component, config.min_log_level, sinks)
    }

    pub fn with_sinks(component: &str, min_level: LogLevel, sinks: Vec<Box<dyn LogSink>>) -> Self {
        Self {
            component: Rc::from(component),
            min_level,
            sinks: Rc::new(sinks),
        }
    }

    /// Same sinks, different component tag
    pub fn for_component(&self, component: &str) -> Self {
        Self {
            component: Rc::from(component),
            min_level: self.min_level,
            sinks: self.sinks.clone(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        let record = LogRecord {
            level,
            component: self.component.to_string(),
            message: message.to_string(),
        };
        for sink in self.sinks.iter() {
            sink.write(&record);
        }
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        self.component == other.component && Rc::ptr_eq(&self.sinks, &other.sinks)
    }
}
