use std::error::Error as StdError;
use std::net::IpAddr;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tunconfig::{Configurator, Error, InterfaceHandle, NetworkConfigurator};

#[derive(Debug, Parser)]
#[clap(about = "Configure TUN interfaces and gateway routes through iproute2")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Assign an address and MTU to an existing TUN interface, bring it up and route it
    Setup {
        /// Interface name, e.g. tun0
        #[clap(long)]
        interface: InterfaceHandle,
        /// Local address in <ip>/<prefix> form
        #[clap(long)]
        address: String,
        #[clap(long)]
        gateway: IpAddr,
        #[clap(long, default_value_t = 1500)]
        mtu: u32,
    },
    AddRoute {
        destination: IpAddr,
        gateway: IpAddr,
    },
    ChangeRoute {
        destination: IpAddr,
        gateway: IpAddr,
    },
    DeleteRoute {
        destination: IpAddr,
        gateway: IpAddr,
        /// Succeed if the route is already absent
        #[clap(long)]
        ignore_missing: bool,
    },
    DefaultGateway,
    /// Print the kernel index of an interface
    Show {
        interface: InterfaceHandle,
    },
}

fn run(command: Commands) -> Result<(), Error> {
    let configurator = Configurator::new();

    match command {
        Commands::Setup {
            interface,
            address,
            gateway,
            mtu,
        } => configurator.setup_tun(&interface, &address, gateway, mtu)?,
        Commands::AddRoute {
            destination,
            gateway,
        } => configurator.add_route(destination, gateway)?,
        Commands::ChangeRoute {
            destination,
            gateway,
        } => configurator.change_route(destination, gateway)?,
        Commands::DeleteRoute {
            destination,
            gateway,
            ignore_missing,
        } => match configurator.delete_route(destination, gateway) {
            Err(e) if ignore_missing && e.is_not_found() => {}
            result => result?,
        },
        Commands::DefaultGateway => match configurator.default_gateway()? {
            Some(gateway) => println!("{gateway}"),
            None => println!("no default gateway"),
        },
        Commands::Show { interface } => {
            println!("Name: {interface}");
            println!("Index: {}", interface.index()?);
        }
    }
    Ok(())
}

fn error_chain(e: &dyn StdError) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Cli::parse();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tunconfig::{ExecutionError, SetupCause, SetupError, SetupStep};

    #[test]
    fn test_error_chain_is_one_line() {
        let e = Error::from(SetupError {
            step: SetupStep::BringUp,
            cause: SetupCause::Execution(ExecutionError {
                command: "ip link set tun0 up".to_string(),
                status: Some(2),
                stderr: b"Cannot find device \"tun0\"\n".to_vec(),
            }),
        });
        assert_eq!(
            error_chain(&e),
            "error setting interface up: `ip link set tun0 up` exited with status 2: \
             Cannot find device \"tun0\""
        );
    }

    #[test]
    fn test_cli_parses_setup() {
        let cli = Cli::parse_from([
            "tunconfigctl",
            "setup",
            "--interface",
            "tun0",
            "--address",
            "10.0.0.5/24",
            "--gateway",
            "10.0.0.1",
        ]);
        match cli.command {
            Commands::Setup { interface, mtu, .. } => {
                assert_eq!(interface.name(), "tun0");
                assert_eq!(mtu, 1500);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
