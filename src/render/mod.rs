pub(crate) mod backend;
pub(crate) mod canvas;
pub(crate) mod cpu;
pub(crate) mod nodes;
pub(crate) mod recording;
