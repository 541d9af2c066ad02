pub(crate) mod fingerprint;
pub(crate) mod render_session;
pub(crate) mod sink;
