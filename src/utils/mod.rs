// Report helpers shared by every formatter
pub mod labels;
pub mod ordering;
pub mod truncate;

pub use labels::{format_price, yes_no};
pub use ordering::{sort_instances, sort_providers, sorted_flavors, sorted_plans};
pub use truncate::truncate;
