pub(crate) mod hit;
pub(crate) mod model;
pub(crate) mod presets;
