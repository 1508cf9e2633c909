use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{name} must be greater than 0 (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f64 },
    #[error("{name} must be between {min} and {max} (got {value})")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("{0}")]
    InvalidParameter(String),
    #[error("unstable system: rho = {rho:.4} (must be < 1)")]
    Unstable { rho: f64 },
    #[error("{0} is not finite; parameters exceed the supported numeric range")]
    Computation(&'static str),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    Stability,
    Computation,
    Usage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NonPositive { .. }
            | Error::Negative { .. }
            | Error::OutOfRange { .. }
            | Error::InvalidParameter(_) => ErrorKind::Validation,
            Error::Unstable { .. } => ErrorKind::Stability,
            Error::Computation(_) | Error::Encode(_) => ErrorKind::Computation,
            Error::ConfigIo(_)
            | Error::ConfigParse(_)
            | Error::UnsupportedConfigFormat(_)
            | Error::Cli(_) => ErrorKind::Usage,
        }
    }

    /// Client errors exit with 2, anything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Stability | ErrorKind::Usage => 2,
            ErrorKind::Computation => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_stability_are_client_errors() {
        let err = Error::NonPositive {
            name: "lambda",
            value: -1.0,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.exit_code(), 2);

        let err = Error::Unstable { rho: 1.25 };
        assert_eq!(err.kind(), ErrorKind::Stability);
        assert_eq!(err.to_string(), "unstable system: rho = 1.2500 (must be < 1)");
    }

    #[test]
    fn computation_errors_are_not_client_errors() {
        let err = Error::Computation("P0");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = Error::OutOfRange {
            name: "n",
            value: 5,
            min: 0,
            max: 4,
        };
        assert_eq!(err.to_string(), "n must be between 0 and 4 (got 5)");
    }
}
