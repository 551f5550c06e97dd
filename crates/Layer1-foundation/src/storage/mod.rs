//! Storage module for gitgutter
//!
//! - `json`: JSON 설정 파일 읽기

mod json;

pub use json::JsonStore;
