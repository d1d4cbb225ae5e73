//! CLI command implementations

pub(crate) mod create;
pub(crate) mod downgrade;
pub(crate) mod info;
pub(crate) mod list;
pub(crate) mod upgrade;
pub(crate) mod version;
