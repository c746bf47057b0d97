//! Domain core of a UML static structure diagram editor: the model element
//! classes, their diagram views, the factory that creates matching
//! model/view pairs and the command plumbing between toolbars and editors.

pub mod common;
pub mod editor;
pub mod structure;
pub mod uml_model;
