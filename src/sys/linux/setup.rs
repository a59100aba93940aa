use super::{classify, ip, RouteTable};
use crate::command::CommandRunner;
use crate::{parse_cidr, InterfaceHandle, SetupError, SetupStep};
use log::{debug, info};
use std::net::IpAddr;

// Address and MTU must be set before the link goes up. The gateway route is always the last step.
pub(super) fn setup_tun<R: CommandRunner>(
    runner: &R,
    interface: &InterfaceHandle,
    address: &str,
    gateway: IpAddr,
    mtu: u32,
) -> Result<(), SetupError> {
    let name = interface.name();

    match ip(runner, &["a", "add", address, "dev", name]) {
        Err(e) if classify::address_assigned(e.stderr()) => {
            debug!("{name} already has {address}, keeping it");
        }
        result => {
            result.map_err(|e| SetupError::new(SetupStep::AssignAddress, e))?;
        }
    }

    let mtu_arg = mtu.to_string();
    ip(runner, &["link", "set", "dev", name, "mtu", mtu_arg.as_str()])
        .map_err(|e| SetupError::new(SetupStep::SetMtu, e))?;

    let (local, _) =
        parse_cidr(address).map_err(|e| SetupError::new(SetupStep::ParseAddress, e))?;

    ip(runner, &["link", "set", name, "up"])
        .map_err(|e| SetupError::new(SetupStep::BringUp, e))?;

    RouteTable::new(runner)
        .add_route(local, gateway)
        .map_err(|e| SetupError::new(SetupStep::AddGatewayRoute, e))?;

    info!("{name} is up with {address} (mtu {mtu}), routed via {gateway}");
    Ok(())
}
