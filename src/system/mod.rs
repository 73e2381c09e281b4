//! Host package and account probes.

mod apt;
mod user;

pub use apt::{PackageSpec, satisfy_packages, update_package_cache};
pub use user::user_exists;
