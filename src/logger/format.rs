//! Log line format module
//!
//! Supports two encodings:
//! - `console` (tab separated, fields as `key=value`)
//! - `json` (one JSON object per line)

use chrono::{DateTime, Local, SecondsFormat};
use serde_json::{Map, Value};

use crate::config::{LogFormat, LogLevel};

/// A single log event
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub time: DateTime<Local>,
    pub level: LogLevel,
    pub message: &'a str,
    pub fields: &'a [(&'a str, &'a str)],
}

impl<'a> LogRecord<'a> {
    /// Create a record stamped with the current time
    pub fn new(level: LogLevel, message: &'a str, fields: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            time: Local::now(),
            level,
            message,
            fields,
        }
    }

    pub fn format(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Console => self.format_console(),
            LogFormat::Json => self.format_json(),
        }
    }

    /// `<ISO-8601 time>\t<LEVEL>\t<message>\t<key=value ...>`
    fn format_console(&self) -> String {
        let mut line = format!(
            "{}\t{}\t{}",
            self.timestamp(),
            self.level.as_str(),
            self.message
        );
        if !self.fields.is_empty() {
            line.push('\t');
            let pairs: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{k}={}", quote_if_needed(v)))
                .collect();
            line.push_str(&pairs.join(" "));
        }
        line
    }

    fn format_json(&self) -> String {
        let mut object = Map::new();
        object.insert("ts".to_string(), Value::from(self.timestamp()));
        object.insert("level".to_string(), Value::from(self.level.as_str().to_lowercase()));
        object.insert("msg".to_string(), Value::from(self.message));
        for (key, value) in self.fields {
            object.insert((*key).to_string(), Value::from(*value));
        }
        Value::Object(object).to_string()
    }

    fn timestamp(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Millis, false)
    }
}

fn quote_if_needed(value: &str) -> String {
    if value.is_empty() || value.contains(char::is_whitespace) || value.contains('"') {
        format!("{value:?}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[(&str, &str)] = &[("ip", "10.0.0.1:5555"), ("path", "/exfil.json")];

    #[test]
    fn test_format_console() {
        let record = LogRecord::new(LogLevel::Info, "New inbound HTTP request", FIELDS);
        let line = record.format(LogFormat::Console);
        assert!(line.contains("\tINFO\tNew inbound HTTP request\t"));
        assert!(line.contains("ip=10.0.0.1:5555 path=/exfil.json"));
    }

    #[test]
    fn test_console_quotes_values_with_spaces() {
        let fields = [("agent", "curl/8.0 (linux)")];
        let record = LogRecord::new(LogLevel::Warn, "probe", &fields);
        let line = record.format(LogFormat::Console);
        assert!(line.contains(r#"agent="curl/8.0 (linux)""#));
    }

    #[test]
    fn test_format_json() {
        let record = LogRecord::new(LogLevel::Error, "delivery failed", FIELDS);
        let line = record.format(LogFormat::Json);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "error");
        assert_eq!(parsed["msg"], "delivery failed");
        assert_eq!(parsed["ip"], "10.0.0.1:5555");
        assert_eq!(parsed["path"], "/exfil.json");
        assert!(parsed["ts"].as_str().is_some());
    }
}
