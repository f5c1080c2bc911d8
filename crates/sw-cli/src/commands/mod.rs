//! CLI command implementations

pub(crate) mod common;
pub(crate) mod hotel;
pub(crate) mod migrate;
pub(crate) mod status;
