mod ifacename;
pub use ifacename::{InterfaceName, InterfaceNameError};

use crate::Error;

pub(crate) fn if_nametoindex(name: &InterfaceName) -> Result<u32, Error> {
    Ok(nix::net::if_::if_nametoindex(name.as_str())?)
}
