//! Reusable UI components

pub mod common;
pub mod filter_dialog;
pub mod help_panel;
pub mod list_table;
pub mod status_bar;
pub mod toolbar;

pub use filter_dialog::{DateField, DatePicker, DialogState, FilterDialog, FilterItem};
pub use help_panel::HelpPanel;
pub use list_table::{cell_text, ListTable, TableView};
pub use status_bar::StatusBar;
pub use toolbar::Toolbar;
