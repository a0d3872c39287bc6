mod descriptor;
mod segment;

pub use descriptor::{
    PlotBuilder, PlotDescriptor, PlotStyle, Trace, DEFAULT_MAP_STYLE, DEFAULT_PALETTE,
    DEFAULT_ZOOM,
};
pub use segment::{split_antimeridian, Segment};
