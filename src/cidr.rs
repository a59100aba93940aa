use crate::ParseError;
use ipnet::IpNet;
use std::net::IpAddr;

/// Splits `<ip>/<prefix>` into the bare address and prefix length.
///
/// Host bits are kept as written, so `10.0.0.5/24` yields `10.0.0.5`, not the network address.
pub fn parse_cidr(text: &str) -> Result<(IpAddr, u8), ParseError> {
    let network = parse_network(text)?;
    Ok((network.addr(), network.prefix_len()))
}

pub fn parse_network(text: &str) -> Result<IpNet, ParseError> {
    let (address, prefix) = text
        .split_once('/')
        .ok_or_else(|| ParseError::MissingPrefix(text.to_string()))?;

    let address: IpAddr = address
        .parse()
        .map_err(|_| ParseError::InvalidAddress(text.to_string()))?;

    // integer parsing would accept a leading '+'
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidPrefix(text.to_string()));
    }

    let max = match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    let out_of_range = |prefix| ParseError::PrefixOutOfRange {
        address,
        prefix,
        max,
    };
    let prefix: u32 = prefix
        .parse()
        .map_err(|_| ParseError::InvalidPrefix(text.to_string()))?;
    let prefix_len = u8::try_from(prefix).map_err(|_| out_of_range(prefix))?;

    IpNet::new(address, prefix_len).map_err(|_| out_of_range(prefix))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(
            parse_cidr("10.0.0.5/24"),
            Ok((IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)), 24))
        );
        assert_eq!(
            parse_cidr("0.0.0.0/0"),
            Ok((IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0))
        );
        assert_eq!(
            parse_cidr("192.168.1.1/32"),
            Ok((IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)), 32))
        );
    }

    #[test]
    fn test_parse_ipv6() {
        assert_eq!(
            parse_cidr("fd00::5/64"),
            Ok((IpAddr::V6("fd00::5".parse::<Ipv6Addr>().unwrap()), 64))
        );
        assert_eq!(
            parse_cidr("::1/128"),
            Ok((IpAddr::V6(Ipv6Addr::LOCALHOST), 128))
        );
    }

    #[test]
    fn test_missing_slash() {
        assert_eq!(
            parse_cidr("10.0.0.5"),
            Err(ParseError::MissingPrefix("10.0.0.5".to_string()))
        );
    }

    #[test]
    fn test_invalid_address() {
        for text in ["not-an-ip/24", "10.0.0/24", "10.0.0.256/24", "/24", "fe80::1%eth0/64"] {
            assert_eq!(
                parse_cidr(text),
                Err(ParseError::InvalidAddress(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn test_invalid_prefix() {
        for text in ["10.0.0.5/", "10.0.0.5/+24", "10.0.0.5/-1", "10.0.0.5/2a", "10.0.0.5/24/8"] {
            assert_eq!(
                parse_cidr(text),
                Err(ParseError::InvalidPrefix(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn test_prefix_out_of_range() {
        assert!(matches!(
            parse_cidr("10.0.0.5/33"),
            Err(ParseError::PrefixOutOfRange { prefix: 33, max: 32, .. })
        ));
        assert!(matches!(
            parse_cidr("fd00::5/129"),
            Err(ParseError::PrefixOutOfRange { prefix: 129, max: 128, .. })
        ));
        assert!(matches!(
            parse_cidr("10.0.0.5/1000"),
            Err(ParseError::PrefixOutOfRange { prefix: 1000, max: 32, .. })
        ));
    }

    #[test]
    fn test_overflowing_prefix_is_invalid() {
        assert_eq!(
            parse_cidr("10.0.0.5/99999999999"),
            Err(ParseError::InvalidPrefix("10.0.0.5/99999999999".to_string()))
        );
    }

    #[test]
    fn test_parse_network_keeps_host_bits() {
        let network = parse_network("10.0.0.5/24").unwrap();
        assert_eq!(network.addr(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)));
        assert_eq!(network.network(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)));
    }
}
