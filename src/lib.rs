mod cidr;
pub mod command;
mod error;
mod traits;
pub use cidr::{parse_cidr, parse_network};
pub use command::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use error::{
    Error, ExecutionError, ParseError, RouteError, RouteOperation, SetupCause, SetupError,
    SetupStep,
};
pub use ipnet;
pub use sys::RouteTable;
pub use traits::NetworkConfigurator;
use delegate::delegate;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
pub mod sys;

/// Name of an existing network interface, typically a freshly allocated TUN device.
///
/// The device is owned by whoever created it; this crate only configures it.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct InterfaceHandle(sys::posix::InterfaceName);

impl InterfaceHandle {
    /// Validates `name` without checking that the interface exists.
    pub fn try_from_name(name: &str) -> Result<Self, Error> {
        sys::posix::InterfaceName::try_from(name)
            .map(Self)
            .map_err(|_| Error::InvalidParameter)
    }

    pub fn name(&self) -> &str {
        self.0.as_str()
    }

    /// Kernel index of the interface, or [`Error::InterfaceNotFound`] if it does not exist.
    pub fn index(&self) -> Result<u32, Error> {
        sys::posix::if_nametoindex(&self.0)
    }
}

impl FromStr for InterfaceHandle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_name(s)
    }
}

impl fmt::Display for InterfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Interface and route configurator for the current platform.
///
/// Runs real commands by default; [`with_runner`](Self::with_runner) substitutes another
/// [`CommandRunner`].
#[derive(Debug, Default, Clone)]
pub struct Configurator<R = SystemRunner>(sys::Iproute2<R>);

impl Configurator {
    pub fn new() -> Self {
        Self(sys::Iproute2::new())
    }
}

impl<R: CommandRunner> Configurator<R> {
    pub fn with_runner(runner: R) -> Self {
        Self(sys::Iproute2::with_runner(runner))
    }

    delegate! {
        to self.0 {
            pub fn routes(&self) -> RouteTable<&R>;
            /// Gateway of the current default route, if there is one.
            pub fn default_gateway(&self) -> Result<Option<IpAddr>, ExecutionError>;
        }
    }
}

impl<R: CommandRunner> NetworkConfigurator for Configurator<R> {
    delegate! {
        to self.0 {
            fn setup_tun(
                &self,
                interface: &InterfaceHandle,
                address: &str,
                gateway: IpAddr,
                mtu: u32,
            ) -> Result<(), SetupError>;
            fn add_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError>;
            fn change_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError>;
            fn delete_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError>;
        }
    }
}
