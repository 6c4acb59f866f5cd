//! Dependent category/subcategory selector.
//!
//! `state` holds the widget-free selection state machine, `component` wires
//! it to a pair of `Select` widgets.

pub mod component;
pub mod state;

pub use component::CategorySubcategorySelect;
pub use state::{filter_by_parent, DependentSelectState, SubcategoryOption, ViewMode};
