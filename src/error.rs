use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetacctError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl NetacctError {
    /// Exit status for this failure. The codes are part of the tool's
    /// external contract: monitoring wrappers key on them.
    pub fn exit_code(&self) -> i32 {
        match self {
            NetacctError::Usage(_) | NetacctError::Capture(_) => 1,
            NetacctError::Snapshot(_) => 18,
        }
    }
}

pub type Result<T> = std::result::Result<T, NetacctError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(NetacctError::Usage("x".to_string()).exit_code(), 1);
        assert_eq!(NetacctError::Capture("x".to_string()).exit_code(), 1);
        assert_eq!(NetacctError::Snapshot("x".to_string()).exit_code(), 18);
    }
}
