pub(crate) mod human_readable;
pub(crate) mod types;
