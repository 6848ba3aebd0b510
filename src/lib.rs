// src/lib.rs

pub mod charts;
pub mod fetch;
pub mod pipeline;
pub mod series;
pub mod transform;
