use delegate::delegate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterfaceNameError {
    #[error("interface name is empty")]
    Empty,
    #[error("interface name is > 16 (null-terminated): {0:?}")]
    NameTooLong(String),
    #[error("NUL byte encountered in name: {0:?}")]
    NulByteEncountered(String),
    #[error("interface name contains '/' or whitespace: {0:?}")]
    InvalidCharacter(String),
}

/// Interface name accepted by the kernel: shorter than `IFNAMSIZ` with the terminating NUL, and
/// free of `/` and whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceName(String);

impl FromStr for InterfaceName {
    type Err = InterfaceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl TryFrom<&str> for InterfaceName {
    type Error = InterfaceNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(InterfaceNameError::Empty);
        }
        if value.len() >= libc::IFNAMSIZ {
            return Err(InterfaceNameError::NameTooLong(value.to_string()));
        }
        if value.contains('\0') {
            return Err(InterfaceNameError::NulByteEncountered(value.to_string()));
        }
        if value.chars().any(|c| c == '/' || c.is_whitespace()) {
            return Err(InterfaceNameError::InvalidCharacter(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl InterfaceName {
    delegate! {
        to self.0 {
            pub fn as_str(&self) -> &str;
        }
    }
}
