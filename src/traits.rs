use crate::{InterfaceHandle, RouteError, SetupError};
use std::net::IpAddr;

/// Interface and route configuration for one target OS.
///
/// Exactly one implementation is compiled in, chosen in [`crate::sys`].
pub trait NetworkConfigurator {
    /// Assigns `address` (in `<ip>/<prefix>` form) and `mtu` to `interface`, brings it up and
    /// routes the bare address through `gateway`.
    ///
    /// Stops at the first failing step. Steps already applied are left in place; rerunning is
    /// safe because an address the interface already carries and an existing gateway route are
    /// both accepted.
    fn setup_tun(
        &self,
        interface: &InterfaceHandle,
        address: &str,
        gateway: IpAddr,
        mtu: u32,
    ) -> Result<(), SetupError>;

    /// Installs a host route. An identical route already being present counts as success.
    fn add_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError>;

    /// Replaces the gateway of an existing route to `destination`.
    fn change_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError>;

    /// Removes a route. Fails when the route is absent; see [`RouteError::is_not_found`].
    fn delete_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError>;
}
