pub mod classification_report;
pub mod observability_baseline;
pub mod route_inventory;
