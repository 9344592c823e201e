use crate::models::{RawStationRecord, StationGroup};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    latitude: u64,
    longitude: u64,
    station_name: String,
    address: String,
}

impl GroupKey {
    fn of(record: &RawStationRecord) -> Self {
        Self {
            latitude: record.latitude.to_bits(),
            longitude: record.longitude.to_bits(),
            station_name: record.station_name.clone(),
            address: record.address.clone(),
        }
    }
}

struct GroupAccumulator<'a> {
    first: &'a RawStationRecord,
    charger_types: BTreeSet<&'a str>,
    charger_count: usize,
}

impl GroupAccumulator<'_> {
    fn finish(self) -> StationGroup {
        StationGroup {
            latitude: self.first.latitude,
            longitude: self.first.longitude,
            station_name: self.first.station_name.clone(),
            address: self.first.address.clone(),
            charger_types: self.charger_types.into_iter().collect::<Vec<_>>().join(", "),
            facility_major: self.first.facility_major.clone(),
            facility_minor: self.first.facility_minor.clone(),
            charger_count: self.charger_count,
        }
    }
}

/// Collapses co-located chargers into one group per station
pub struct StationAggregator {
    skip_empty_types: bool,
}

impl StationAggregator {
    pub fn new() -> Self {
        Self {
            skip_empty_types: true,
        }
    }

    pub fn with_skip_empty_types(skip_empty_types: bool) -> Self {
        Self { skip_empty_types }
    }

    /// Group by (latitude, longitude, station name, address); groups come out in
    /// order of first appearance. `charger_count` counts rows with a charger ID.
    pub fn aggregate<'a, I>(&self, records: I) -> Vec<StationGroup>
    where
        I: IntoIterator<Item = &'a RawStationRecord>,
    {
        let mut positions: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<GroupAccumulator<'a>> = Vec::new();

        for record in records {
            let position = *positions.entry(GroupKey::of(record)).or_insert_with(|| {
                groups.push(GroupAccumulator {
                    first: record,
                    charger_types: BTreeSet::new(),
                    charger_count: 0,
                });
                groups.len() - 1
            });

            let group = &mut groups[position];
            if !record.charger_id.trim().is_empty() {
                group.charger_count += 1;
            }
            if !(self.skip_empty_types && record.charger_type.is_empty()) {
                group.charger_types.insert(record.charger_type.as_str());
            }
        }

        groups.into_iter().map(GroupAccumulator::finish).collect()
    }
}

impl Default for StationAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate with default settings
pub fn aggregate<'a, I>(records: I) -> Vec<StationGroup>
where
    I: IntoIterator<Item = &'a RawStationRecord>,
{
    StationAggregator::new().aggregate(records)
}
