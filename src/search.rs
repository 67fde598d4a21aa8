//! Site vertical search box

mod controller;

pub use controller::{OnChange, SITE_VERTICALS_REQUEST_ID, SearchInputController, SearchSession};
