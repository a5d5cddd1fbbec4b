pub(crate) mod canvas;
pub(crate) mod context;
pub(crate) mod surface_pool;
pub(crate) mod texture;
