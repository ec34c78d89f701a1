//! SeaORM entity definitions.

pub mod dashboard;
pub mod inspection;
pub mod inspection_answer;
pub mod pipeline;
pub mod support;
