pub(crate) mod builder;
pub(crate) mod highlight;
pub(crate) mod model;
