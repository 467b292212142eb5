pub(crate) mod strtime;
