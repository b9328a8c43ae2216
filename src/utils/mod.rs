//! Internal utility helpers for report date parsing.

pub(crate) mod date;
