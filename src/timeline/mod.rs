pub(crate) mod phases;
pub(crate) mod sequence;
