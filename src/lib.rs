//! Interactive dashboard over a table of SpaceX launches: a success pie per
//! site and a payload/outcome scatter, both driven by a site dropdown and a
//! payload range control.

pub mod app;
pub mod binding;
pub mod charts;
pub mod cli;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
pub mod view_model;
