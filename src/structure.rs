pub mod structure_diagram;
pub mod structure_factory;
pub mod structure_models;
pub mod structure_views;
