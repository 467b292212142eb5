pub(crate) mod b;
pub(crate) mod escape;
pub(crate) mod itime;
