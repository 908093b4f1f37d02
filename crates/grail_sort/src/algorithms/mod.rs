pub(crate) mod blocks;
pub(crate) mod build;
pub(crate) mod common;
pub(crate) mod grail;
pub(crate) mod keys;
pub(crate) mod lazy;
pub(crate) mod merge;
pub(crate) mod rotation;
