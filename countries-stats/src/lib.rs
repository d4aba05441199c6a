pub mod error;
pub mod loader;
pub mod reference;
pub mod table;
pub mod thresholds;

pub use error::{StatsError, StatsResult};
pub use loader::{
    load_country_table_json, load_country_table_json_file, load_scans_csv, load_scans_csv_file,
    load_scans_json, load_scans_json_file,
};
pub use reference::{CountryReference, CountryTable};
pub use table::ScanStatsTable;
