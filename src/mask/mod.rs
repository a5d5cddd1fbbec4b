pub(crate) mod bounds;
pub(crate) mod compositor;
pub(crate) mod descriptor;
pub(crate) mod opts;
pub(crate) mod plan;
pub(crate) mod raster;
