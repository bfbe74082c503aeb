pub(crate) mod input;
pub(crate) mod scheduler;
pub(crate) mod session;
pub(crate) mod transition;
