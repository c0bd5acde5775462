//! Route tables, grouped by resource

pub mod catalog;
