pub mod aggregator;
pub mod load_report;
pub mod region_filter;

pub use aggregator::{aggregate, StationAggregator};
pub use load_report::LoadReport;
pub use region_filter::{
    filter_by_province, filter_by_region, filter_within_radius, province_centroid,
};
