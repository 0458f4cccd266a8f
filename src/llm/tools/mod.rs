//! Agent可调用的工具

pub mod web_search;
