//! Capacity evaluation against the QR payload budget.
//!
//! Every artifact is measured three ways: raw bytes, base64 characters and
//! characters of the full `data:` URI. Only the last one is compared with
//! [`QR_CAPACITY`].

mod report;
mod transport;

pub use report::{
    evaluate, fits_capacity, read_artifact, suggested_duration, utilization_pct, CapacityReport,
    QR_CAPACITY,
};
pub use transport::{data_uri, encode, encoded_len, wrapped_len, DATA_URI_PREFIX};
