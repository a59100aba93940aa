//! Recognition of iproute2 failure replies.
//!
//! iproute2 prints the kernel's netlink error as `RTNETLINK answers: <strerror>`. The messages
//! below are the untranslated glibc strings; a localized libc would need additional entries.

/// `EEXIST`, returned by `ip r add` when a route to the destination is already installed.
const ROUTE_EXISTS: &str = "File exists";

/// `ESRCH`, returned by `ip r del` when no route matches.
const ROUTE_NOT_FOUND: &str = "No such process";

/// iproute2 5.x and later replace the IPv4 `EEXIST` reply of `ip a add` with an extended ack.
const ADDRESS_ASSIGNED: &str = "Address already assigned";

pub(crate) fn route_exists(stderr: &[u8]) -> bool {
    contains(stderr, ROUTE_EXISTS)
}

pub(crate) fn route_not_found(stderr: &[u8]) -> bool {
    contains(stderr, ROUTE_NOT_FOUND)
}

/// `ip a add` for an address the interface already carries.
pub(crate) fn address_assigned(stderr: &[u8]) -> bool {
    contains(stderr, ADDRESS_ASSIGNED) || contains(stderr, ROUTE_EXISTS)
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}
