pub(crate) mod flags;
pub(crate) mod rounds;
pub(crate) mod validate;
