cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        mod linux;
        pub use linux::{Iproute2, RouteTable};
    } else {
        compile_error!("tunconfig only supports Linux");
    }
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        pub mod posix;
    }
}
