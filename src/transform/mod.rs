//! Transform adapters from upstream report shapes into aggregation inputs.

pub(crate) mod adverse_event;
