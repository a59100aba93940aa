use super::{classify, ip};
use crate::command::CommandRunner;
use crate::{ExecutionError, RouteError, RouteOperation};
use log::debug;
use std::net::IpAddr;

/// Host routes in the main table, managed through `ip route`.
///
/// Nothing is cached: every call is one `ip` invocation and the kernel table is the only state.
pub struct RouteTable<R> {
    runner: R,
}

impl<R: CommandRunner> RouteTable<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn add_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError> {
        match self.modify(RouteOperation::Add, destination, gateway) {
            Err(e) if classify::route_exists(e.source.stderr()) => {
                debug!("route to {destination} already present, keeping it");
                Ok(())
            }
            result => result,
        }
    }

    pub fn change_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError> {
        self.modify(RouteOperation::Change, destination, gateway)
    }

    pub fn delete_route(&self, destination: IpAddr, gateway: IpAddr) -> Result<(), RouteError> {
        self.modify(RouteOperation::Delete, destination, gateway)
    }

    /// Gateway of the first default route, or `None` if no default route has one.
    pub fn default_gateway(&self) -> Result<Option<IpAddr>, ExecutionError> {
        let output = ip(&self.runner, &["r", "show", "default"])?;
        Ok(parse_default_gateway(&String::from_utf8_lossy(&output.stdout)))
    }

    fn modify(
        &self,
        operation: RouteOperation,
        destination: IpAddr,
        gateway: IpAddr,
    ) -> Result<(), RouteError> {
        let verb = match operation {
            RouteOperation::Add => "add",
            RouteOperation::Change => "change",
            RouteOperation::Delete => "del",
        };
        let destination_arg = destination.to_string();
        let gateway_arg = gateway.to_string();

        ip(
            &self.runner,
            &["r", verb, destination_arg.as_str(), "via", gateway_arg.as_str()],
        )
        .map(|_| ())
        .map_err(|source| RouteError {
            operation,
            destination,
            gateway,
            source,
        })
    }
}

impl RouteError {
    /// True when the kernel reported that no matching route exists.
    pub fn is_not_found(&self) -> bool {
        classify::route_not_found(self.source.stderr())
    }
}

fn parse_default_gateway(routes: &str) -> Option<IpAddr> {
    routes.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("default") {
            return None;
        }
        tokens
            .skip_while(|token| *token != "via")
            .nth(1)
            .and_then(|gateway| gateway.parse().ok())
    })
}
