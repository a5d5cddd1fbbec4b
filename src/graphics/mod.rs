pub(crate) mod feather_mask;
pub(crate) mod graphic;
pub(crate) mod snapshot;
