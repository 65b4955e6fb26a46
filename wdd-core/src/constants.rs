//! Fixed constants shared by every page.

/// Minimum physically meaningful reservoir percentage. Summary metrics
/// clamp reservoir values up to this floor; chart data never does.
pub const DEAD_STORAGE_THRESHOLD: f64 = 0.05;

/// Three-letter month abbreviations in calendar order (index 0 = January).
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar quarters in order.
pub const QUARTERS: [u32; 4] = [1, 2, 3, 4];

/// Date format of the `date` column: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used for day-of-year selector labels: "Jan 05"
pub const DAY_LABEL_FORMAT: &str = "%b %d";

/// Default path of the dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "Data.csv";

/// Header of the date column.
pub const DATE_COLUMN: &str = "date";
/// Header of the reservoir level column (percent).
pub const RESERVOIR_COLUMN: &str = "Reservoir";
/// Header of the groundwater level column (meters).
pub const GROUNDWATER_COLUMN: &str = "GW Level";
/// Header of the rainfall column (millimeters).
pub const RAINFALL_COLUMN: &str = "Rainfall";
