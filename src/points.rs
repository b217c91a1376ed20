mod api;
mod error;
mod layers;
mod xml;
mod yaml;


pub use api::{is_points_xml, is_points_yaml, read_cells, read_points, write_cells};
pub use error::{PointsError, Result};
pub use layers::{
    CELLS_LAYER, NON_CELLS_LAYER, cell_arrays, cell_features, layer_to_cells, load_cell_layers,
    write_point_layers,
};
pub use xml::XML_ROOT;
