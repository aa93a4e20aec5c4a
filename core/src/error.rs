use crate::app::AppRef;
use log::debug;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Hash)]
pub enum RolloutError {
    #[error("app must be given in the form owner/appname")]
    MalformedAppRef,
    #[error("app owner and name must not contain whitespace")]
    InvalidAppRefCharacters,
}

pub type RolloutResult<T> = Result<T, RolloutError>;

impl<T> From<RolloutError> for Result<T, RolloutError> {
    fn from(e: RolloutError) -> Self {
        Err(e)
    }
}

/// Failure raised by the deployment API collaborator.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ApiError {
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("failed to reach the API: {0}")]
    Transport(String),
    #[error("failed to decode API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Classification of a failed command, surfaced as the process exit code.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorCode {
    Exception,
    InvalidParameter,
    NotLoggedIn,
}

impl ErrorCode {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::Exception => 1,
            ErrorCode::InvalidParameter => 2,
            ErrorCode::NotLoggedIn => 3,
        }
    }
}

/// A structured command failure: a code plus a message for the user.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{message}")]
pub struct CommandError {
    pub code: ErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn exception(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Exception, message)
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParameter, message)
    }

    pub fn not_logged_in(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotLoggedIn, message)
    }

    /// Converts a failure to fetch an app's deployments or their metrics.
    /// A 404 means the app itself is unknown, anything else is reported
    /// as a generic fetch failure.
    pub fn from_deployment_fetch(app: &AppRef, e: &ApiError) -> Self {
        debug!("{e:#?}");
        if e.is_not_found() {
            return Self::invalid_parameter(format!(
                "The app {app} does not exist. Please double check the name, \
                 and provide it in the form owner/appname.\n\
                 Run the command `rollout app list` to see your apps."
            ));
        }
        Self::exception("Failed to fetch deployments")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_not_found_maps_to_invalid_parameter() {
        let app = AppRef::from_str("acme/shop").unwrap();
        let e = ApiError::Status {
            status: 404,
            message: "not found".to_owned(),
        };
        let command_error = CommandError::from_deployment_fetch(&app, &e);
        assert_eq!(command_error.code, ErrorCode::InvalidParameter);
        assert!(command_error.message.contains("acme/shop"));
    }

    #[test]
    fn test_other_failures_map_to_exception() {
        let app = AppRef::from_str("acme/shop").unwrap();
        for e in [
            ApiError::Status {
                status: 500,
                message: "boom".to_owned(),
            },
            ApiError::Transport("connection refused".to_owned()),
            ApiError::Decode("expected array".to_owned()),
        ] {
            let command_error = CommandError::from_deployment_fetch(&app, &e);
            assert_eq!(command_error.code, ErrorCode::Exception);
            assert_eq!(command_error.message, "Failed to fetch deployments");
        }
    }

    struct RecordingLogger {
        records: std::sync::Mutex<Vec<(log::Level, String)>>,
    }

    impl log::Log for RecordingLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            let entry = (record.level(), record.args().to_string());
            self.records.lock().unwrap().push(entry);
        }

        fn flush(&self) {}
    }

    static LOGGER: RecordingLogger = RecordingLogger {
        records: std::sync::Mutex::new(Vec::new()),
    };

    #[test]
    fn test_handled_fetch_failure_logs_at_debug() {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
        let app = AppRef::from_str("acme/shop").unwrap();
        let e = ApiError::Transport("dns lookup of api.acme.dev failed".to_owned());
        CommandError::from_deployment_fetch(&app, &e);
        let records = LOGGER.records.lock().unwrap();
        let levels: Vec<_> = records
            .iter()
            .filter(|(_, message)| message.contains("dns lookup of api.acme.dev"))
            .map(|(level, _)| *level)
            .collect();
        assert_eq!(levels, vec![log::Level::Debug]);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidParameter.to_string(), "invalid-parameter");
        assert_eq!(ErrorCode::Exception.exit_code(), 1);
    }
}
