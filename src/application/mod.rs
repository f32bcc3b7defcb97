// Application layer - Use cases over the domain
pub mod dashboard_controller;
pub mod sample_source;
pub mod series_builder;
pub mod tick_sampler;
