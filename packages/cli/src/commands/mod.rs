pub mod check;
pub mod dump;
pub mod files;
pub mod fmt;
pub mod init;
pub mod sections;

pub use check::{check, CheckArgs};
pub use dump::{dump, DumpArgs};
pub use fmt::{fmt, FmtArgs};
pub use init::{init, InitArgs};
pub use sections::{sections, SectionsArgs};
