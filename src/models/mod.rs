mod network;
mod occupancy;
mod section;
mod station;
mod train;

pub use network::{
    augment_with_nearest_neighbors, build_adjacency, Adjacency, NameGraph, Network, NetworkSummary, Sections,
    Stations,
};
pub use occupancy::{overlap_window, BlockId, BlockOccupancy};
pub use section::{LegType, Section};
pub use station::{merge_station_sets, Station};
pub use train::{PriorityLevel, Train};
