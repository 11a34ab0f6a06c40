pub(crate) mod ink;
pub(crate) mod manager;
