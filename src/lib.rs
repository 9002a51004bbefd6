// src/lib.rs
//
// panelcols — regroups the input panels of split-payment-simulator.html into
// a two-column layout. A one-time rewrite: titles, anchors and layout are
// fixed in `plan`.

pub mod error;
pub mod layout;
pub mod plan;
pub mod region;
pub mod tag;
pub mod transform;

pub use error::{Error, Result};
pub use region::{extract, Container, Region};
pub use transform::{restructure, run};

/// Extract the group-box panel headed by `<h3>{title}</h3>`.
pub fn extract_panel(document: &str, title: &str) -> Result<Region> {
    extract(document, &plan::heading(title), &plan::GROUP_BOX)
}
