pub(crate) mod fetch;
pub(crate) mod manifest;
pub(crate) mod offline;
pub(crate) mod storage;
