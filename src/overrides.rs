pub(crate) mod chain;
pub(crate) mod entry;
pub(crate) mod merge;
pub(crate) mod resolve;
pub(crate) mod table;
