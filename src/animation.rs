pub(crate) mod level;
