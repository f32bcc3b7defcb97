// Domain layer - Samples, series and dashboard view state
pub mod chart;
pub mod sample;
pub mod view_state;
