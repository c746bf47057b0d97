pub mod canvas;
pub mod eref;
pub mod fluent;
pub mod observer;
pub mod uuid;
