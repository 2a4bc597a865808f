//! Third-party crates shared by the kiln workspace.
//!
//! The crates are re-exported so that every member of the workspace builds
//! against the same versions.

pub use chrono;
pub use itertools;
pub use log;
pub use pathdiff;
pub use rand;
pub use thiserror;
pub use walkdir;

/// Name of the function this macro is called in
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        &name[..name.len() - 3]
    }};
}
