pub mod group;
pub mod map_view;
pub mod station;

pub use group::StationGroup;
pub use map_view::{MapMarker, MapView, MarkerPopup};
pub use station::{derive_region, RawStationRecord};
