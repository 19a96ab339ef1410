//! Structured log event model forwarded to the remote log sink.
//!
//! The serialized form is the sink's wire contract:
//!
//! ```json
//! { "stack": "backend", "level": "info", "package": "service", "message": "..." }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of the system that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Frontend,
    Backend,
}

impl FromStr for Stack {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            other => Err(format!("unknown stack '{other}'")),
        }
    }
}

/// Event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Category tag describing which part of the system emitted the event.
///
/// Frontend-only, backend-only and shared tags are accepted by the sink;
/// [`Package::allowed_for`] reports which combinations are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    // Frontend
    Api,
    Component,
    Hook,
    Page,
    State,
    Style,
    // Backend
    Cache,
    Controller,
    CronJob,
    Db,
    Domain,
    Handler,
    Repository,
    Route,
    Service,
    // Shared
    Auth,
    Config,
    Middleware,
    Utils,
}

impl Package {
    /// Returns whether this tag belongs to the given stack.
    pub fn allowed_for(self, stack: Stack) -> bool {
        use Package::*;
        match self {
            Api | Component | Hook | Page | State | Style => stack == Stack::Frontend,
            Cache | Controller | CronJob | Db | Domain | Handler | Repository | Route
            | Service => stack == Stack::Backend,
            Auth | Config | Middleware | Utils => true,
        }
    }
}

/// A single structured log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub stack: Stack,
    pub level: Level,
    pub package: Package,
    pub message: String,
}

impl LogEvent {
    pub fn new(stack: Stack, level: Level, package: Package, message: impl Into<String>) -> Self {
        Self {
            stack,
            level,
            package,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}/{:?}/{:?}] {}",
            self.stack, self.level, self.package, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let event = LogEvent::new(
            Stack::Backend,
            Level::Warn,
            Package::CronJob,
            "custom code taken",
        );

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "stack": "backend",
                "level": "warn",
                "package": "cron_job",
                "message": "custom code taken"
            })
        );
    }

    #[test]
    fn test_stack_from_str() {
        assert_eq!("frontend".parse::<Stack>().unwrap(), Stack::Frontend);
        assert_eq!("BACKEND".parse::<Stack>().unwrap(), Stack::Backend);
        assert!("mobile".parse::<Stack>().is_err());
    }

    #[test]
    fn test_package_stack_membership() {
        assert!(Package::Component.allowed_for(Stack::Frontend));
        assert!(!Package::Component.allowed_for(Stack::Backend));
        assert!(Package::Db.allowed_for(Stack::Backend));
        assert!(!Package::Db.allowed_for(Stack::Frontend));
        assert!(Package::Middleware.allowed_for(Stack::Frontend));
        assert!(Package::Middleware.allowed_for(Stack::Backend));
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::Fatal);
    }
}
