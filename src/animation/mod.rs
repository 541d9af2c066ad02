pub(crate) mod ease;
pub(crate) mod interpolate;
pub(crate) mod lines;
pub(crate) mod spring;
pub(crate) mod typewriter;
