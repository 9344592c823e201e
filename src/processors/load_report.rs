use serde::Serialize;

/// Row accounting for one load of the charger partitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub partition_rows: Vec<usize>,
    pub total_rows: usize,
    pub coordinate_parse_failures: usize,
    pub out_of_bounds: usize,
    pub incomplete_addresses: usize,
    pub retained: usize,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.coordinate_parse_failures + self.out_of_bounds
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.total_rows as f64
        }
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Charger Data Load Report ===\n");
        for (i, rows) in self.partition_rows.iter().enumerate() {
            summary.push_str(&format!("Partition {}: {} rows\n", i + 1, rows));
        }
        summary.push_str(&format!("Total Rows: {}\n", self.total_rows));
        summary.push_str(&format!(
            "Retained Rows: {} ({:.1}%)\n",
            self.retained,
            self.percentage(self.retained)
        ));
        summary.push_str(&format!(
            "Unparseable Coordinates: {} ({:.1}%)\n",
            self.coordinate_parse_failures,
            self.percentage(self.coordinate_parse_failures)
        ));
        summary.push_str(&format!(
            "Outside Bounding Box: {} ({:.1}%)\n",
            self.out_of_bounds,
            self.percentage(self.out_of_bounds)
        ));
        summary.push_str(&format!(
            "Addresses Without District: {}\n",
            self.incomplete_addresses
        ));

        summary
    }
}
