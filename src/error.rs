use std::borrow::Cow;
use std::fmt;
use std::net::IpAddr;
use thiserror::Error as ThisError;

#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid parameter")]
    InvalidParameter,
    #[error("interface not found")]
    InterfaceNotFound,
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    Setup(#[from] SetupError),
}

#[cfg(unix)]
impl From<nix::Error> for Error {
    fn from(e: nix::Error) -> Self {
        match e {
            nix::Error::ENODEV | nix::Error::ENXIO => Error::InterfaceNotFound,
            _ => Error::InvalidParameter,
        }
    }
}

/// An external command could not be spawned or exited unsuccessfully.
///
/// `stderr` is kept exactly as the child produced it. For spawn failures it holds the
/// OS error message instead, and `status` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("`{command}` {}: {}", describe_status(.status), lossy(.stderr).trim())]
pub struct ExecutionError {
    pub command: String,
    pub status: Option<i32>,
    pub stderr: Vec<u8>,
}

impl ExecutionError {
    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        lossy(&self.stderr)
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exited with status {code}"),
        None => "could not be run".to_string(),
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ParseError {
    #[error("missing prefix length in {0:?}")]
    MissingPrefix(String),
    #[error("invalid IP address in {0:?}")]
    InvalidAddress(String),
    #[error("invalid prefix length in {0:?}")]
    InvalidPrefix(String),
    #[error("prefix length {prefix} is out of range for {address} (max {max})")]
    PrefixOutOfRange { address: IpAddr, prefix: u32, max: u8 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteOperation {
    Add,
    Change,
    Delete,
}

impl fmt::Display for RouteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RouteOperation::Add => "add",
            RouteOperation::Change => "change",
            RouteOperation::Delete => "delete",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("failed to {operation} route to {destination} via {gateway}")]
pub struct RouteError {
    pub operation: RouteOperation,
    pub destination: IpAddr,
    pub gateway: IpAddr,
    #[source]
    pub source: ExecutionError,
}

/// Steps of the TUN setup sequence, in execution order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SetupStep {
    AssignAddress,
    SetMtu,
    ParseAddress,
    BringUp,
    AddGatewayRoute,
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SetupStep::AssignAddress => "assigning IP",
            SetupStep::SetMtu => "setting MTU",
            SetupStep::ParseAddress => "parsing IP CIDR",
            SetupStep::BringUp => "setting interface up",
            SetupStep::AddGatewayRoute => "setting gateway for interface",
        })
    }
}

/// Failure of one step of the TUN setup sequence. Steps already applied are not rolled back.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("error {step}")]
pub struct SetupError {
    pub step: SetupStep,
    #[source]
    pub cause: SetupCause,
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SetupCause {
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Route(#[from] RouteError),
}

impl SetupError {
    pub(crate) fn new(step: SetupStep, cause: impl Into<SetupCause>) -> Self {
        Self {
            step,
            cause: cause.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_execution_error_display() {
        let e = ExecutionError {
            command: "ip r add 203.0.113.5 via 10.0.0.1".to_string(),
            status: Some(2),
            stderr: b"RTNETLINK answers: File exists\n".to_vec(),
        };
        assert_eq!(
            e.to_string(),
            "`ip r add 203.0.113.5 via 10.0.0.1` exited with status 2: RTNETLINK answers: File exists"
        );

        let e = ExecutionError {
            command: "ip link set tun0 up".to_string(),
            status: None,
            stderr: b"No such file or directory (os error 2)".to_vec(),
        };
        assert_eq!(
            e.to_string(),
            "`ip link set tun0 up` could not be run: No such file or directory (os error 2)"
        );
    }

    #[test]
    fn test_setup_error_names_step() {
        let e = SetupError::new(
            SetupStep::ParseAddress,
            ParseError::InvalidAddress("not-an-ip/24".to_string()),
        );
        assert_eq!(e.to_string(), "error parsing IP CIDR");
        assert!(matches!(e.cause, SetupCause::Parse(_)));

        let source = std::error::Error::source(&e).map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("invalid IP address in \"not-an-ip/24\"")
        );
    }
}
