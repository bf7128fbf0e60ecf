//! Error types for neos-contribute

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure that can abort a `setup` or transfer run
///
/// There is no local recovery: each variant unwinds to the top-level handler,
/// which maps it to a process exit status via [`Error::exit_code`].
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid settings
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable GitHub credential
    #[error("authentication error: {0}")]
    Auth(String),

    /// A command exited non-zero and was not forced
    #[error("command `{command}` failed with exit code {code}:\n{output}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit status reported by the process
        code: i32,
        /// Captured stdout and stderr
        output: String,
    },

    /// Working directory of a command does not exist
    #[error("directory \"{}\" does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Hosting platform or review system call failed
    #[error("API error: {message}")]
    Api {
        /// Message reported by the provider
        message: String,
        /// HTTP status reported by the provider, if any
        code: Option<u16>,
    },

    /// `origin` does not point at any known repository
    #[error("origin remote does not match any known repository:\n{output}")]
    RemoteNotRecognized {
        /// Output of `git remote show origin`
        output: String,
    },

    /// A fork named by the user does not exist
    #[error("the fork \"{0}\" was not found in your GitHub account")]
    ForkNotFound(String),

    /// The package a change targets is not installed locally
    #[error("package \"{0}\" is not installed locally")]
    PackageNotInstalled(String),

    /// Terminal interaction failed
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be (de)serialized
    #[error("settings error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an API error without a status code
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            code: None,
        }
    }

    /// Process exit status for this error
    ///
    /// Failed commands exit with their own status and API errors with the
    /// provider's status code; both fall back to 1 when the value does not
    /// fit a process exit status.
    pub fn exit_code(&self) -> u8 {
        let code = match self {
            Self::CommandFailed { code, .. } => i64::from(*code),
            Self::Api {
                code: Some(code), ..
            } => i64::from(*code),
            _ => 1,
        };
        u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
    }

    /// Follow-up advice shown below the error message
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) | Self::Auth(_) => Some("Please run `contribute setup` first"),
            Self::DirectoryNotFound(_) | Self::RemoteNotRecognized { .. } => Some(
                "Maybe your git remotes are not configured correctly, try to run `contribute setup`",
            ),
            Self::ForkNotFound(_) => Some("Please start again"),
            Self::PackageNotInstalled(_) => Some("Check your composer.json and run composer update"),
            _ => None,
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Self::Api {
                message: source.message.clone(),
                code: Some(source.status_code.as_u16()),
            },
            other => Self::api(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Api {
            code: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failure_exits_with_its_status() {
        let err = Error::CommandFailed {
            command: "git push origin 12345".to_string(),
            code: 128,
            output: "fatal: no such remote".to_string(),
        };
        assert_eq!(err.exit_code(), 128);
    }

    #[test]
    fn test_out_of_range_codes_fall_back_to_one() {
        let err = Error::Api {
            message: "Not Found".to_string(),
            code: Some(404),
        };
        assert_eq!(err.exit_code(), 1);

        let err = Error::CommandFailed {
            command: "sh".to_string(),
            code: -1,
            output: String::new(),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_api_error_without_code_exits_with_one() {
        assert_eq!(Error::api("boom").exit_code(), 1);
        assert_eq!(
            Error::DirectoryNotFound(PathBuf::from("/nope")).exit_code(),
            1
        );
    }

    #[test]
    fn test_configuration_errors_suggest_setup() {
        let hint = Error::Config("no token".to_string()).hint().unwrap();
        assert!(hint.contains("contribute setup"));
    }
}
