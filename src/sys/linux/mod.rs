use crate::command::{CommandOutput, CommandRunner, Invocation, SystemRunner};
use crate::{ExecutionError, InterfaceHandle, NetworkConfigurator, RouteError, SetupError};
use std::net::IpAddr;

pub use route::RouteTable;

mod classify;
mod route;
mod setup;

/// iproute2 front-end.
const IP: &str = "ip";

/// Configures interfaces and routes by running iproute2's `ip` tool.
#[derive(Debug, Default, Clone)]
pub struct Iproute2<R = SystemRunner> {
    runner: R,
}

impl Iproute2 {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: CommandRunner> Iproute2<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    pub fn routes(&self) -> RouteTable<&R> {
        RouteTable::new(&self.runner)
    }

    pub fn default_gateway(&self) -> Result<Option<IpAddr>, ExecutionError> {
        self.routes().default_gateway()
    }
}

fn ip<R: CommandRunner>(runner: &R, args: &[&str]) -> Result<CommandOutput, ExecutionError> {
    runner.run(&Invocation::new(IP, args.iter().copied()))
}

impl<R: CommandRunner> NetworkConfigurator for Iproute2<R> {
    fn setup_tun(
        &self,
        interface: &InterfaceHandle,
        address: &str,
        gateway: IpAddr,
        mtu: u32,
    ) -> Result<(), SetupError> {
        setup::setup_tun(&self.runner, interface, address, gateway, mtu)
    }

    fn add_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError> {
        self.routes().add_route(destination, gateway)
    }

    fn change_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError> {
        self.routes().change_route(destination, gateway)
    }

    fn delete_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError> {
        self.routes().delete_route(destination, gateway)
    }
}
