//! Request body sent to the migration endpoint

use serde::{Deserialize, Serialize};

/// Body of a `POST /api/migration` request.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRequest {
    pub input: String,
    pub output: String,
    pub csv_source_file_name: String,
    pub csv_destination_file_name: String,
}

impl MigrationRequest {
    /// The CSV-to-CSV migration every simulated user submits
    pub fn csv_to_csv() -> Self {
        Self {
            input: "CSV".to_string(),
            output: "CSV".to_string(),
            csv_source_file_name: "sample.csv".to_string(),
            csv_destination_file_name: "destination_file.csv".to_string(),
        }
    }

    /// Encode as compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
