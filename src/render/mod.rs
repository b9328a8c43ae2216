//! Output renderers: pretty JSON for the CLI and the HTML homepage.

pub(crate) mod html;
pub(crate) mod json;
