//! Command implementations and terminal rendering

pub mod calc;
pub mod history;
pub mod insights;
pub mod sales;
pub mod setup;
pub mod ui;
