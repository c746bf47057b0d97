pub mod editor_commands;
pub mod settings;
pub mod toolbar;
