pub mod quantize_service;

pub use quantize_service::{PaletteSummary, QuantizeOutcome, QuantizeService};
