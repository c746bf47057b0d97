use crate::editor::settings::EditorSettings;
use crate::structure::structure_models::{ElementType, RelationEndType, RelationType};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scaling {
    Scaling50,
    Scaling75,
    Scaling100,
    Scaling150,
}

impl Scaling {
    pub fn factor(&self) -> f32 {
        match self {
            Scaling::Scaling50 => 0.5,
            Scaling::Scaling75 => 0.75,
            Scaling::Scaling100 => 1.0,
            Scaling::Scaling150 => 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    SelectMode,
    Undo,
    Redo,
    Redraw,
    Zoom(Scaling),
    BringToFront,
    PutToBack,
    EditProperties,
    CreateElement(ElementType),
    CreateConnection(RelationType),
    ResetPoints,
    RectToDirect,
    DirectToRect,
    SetNavigability(RelationEndType),
    ShowGrid,
    SnapToGrid,
}

/// Commands issued by menus and toolbars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppCommand {
    New,
    Open,
    Save,
    Cut,
    Copy,
    Paste,
    Delete,
    Editor(EditorCommand),
}

impl From<EditorCommand> for AppCommand {
    fn from(value: EditorCommand) -> Self {
        AppCommand::Editor(value)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}

const EDITOR_COMMAND_IDS: &[(&str, EditorCommand)] = &[
    ("SELECT_MODE", EditorCommand::SelectMode),
    ("UNDO", EditorCommand::Undo),
    ("REDO", EditorCommand::Redo),
    ("REDRAW", EditorCommand::Redraw),
    ("ZOOM_50", EditorCommand::Zoom(Scaling::Scaling50)),
    ("ZOOM_75", EditorCommand::Zoom(Scaling::Scaling75)),
    ("ZOOM_100", EditorCommand::Zoom(Scaling::Scaling100)),
    ("ZOOM_150", EditorCommand::Zoom(Scaling::Scaling150)),
    ("BRING_TO_FRONT", EditorCommand::BringToFront),
    ("PUT_TO_BACK", EditorCommand::PutToBack),
    ("EDIT_PROPERTIES", EditorCommand::EditProperties),
    ("CREATE_PACKAGE", EditorCommand::CreateElement(ElementType::Package)),
    ("CREATE_COMPONENT", EditorCommand::CreateElement(ElementType::Component)),
    ("CREATE_CLASS", EditorCommand::CreateElement(ElementType::Class)),
    ("CREATE_NOTE", EditorCommand::CreateElement(ElementType::Note)),
    ("CREATE_DEPENDENCY", EditorCommand::CreateConnection(RelationType::Dependency)),
    ("CREATE_NOTE_CONNECTION", EditorCommand::CreateConnection(RelationType::NoteConnector)),
    ("CREATE_ASSOCIATION", EditorCommand::CreateConnection(RelationType::Association)),
    ("CREATE_COMPOSITION", EditorCommand::CreateConnection(RelationType::Composition)),
    ("CREATE_AGGREGATION", EditorCommand::CreateConnection(RelationType::Aggregation)),
    ("CREATE_INHERITANCE", EditorCommand::CreateConnection(RelationType::Inheritance)),
    (
        "CREATE_INTERFACE_REALIZATION",
        EditorCommand::CreateConnection(RelationType::InterfaceRealization),
    ),
    ("RESET_POINTS", EditorCommand::ResetPoints),
    ("RECT_TO_DIRECT", EditorCommand::RectToDirect),
    ("DIRECT_TO_RECT", EditorCommand::DirectToRect),
    ("NAVIGABLE_TO_SOURCE", EditorCommand::SetNavigability(RelationEndType::Source)),
    ("NAVIGABLE_TO_TARGET", EditorCommand::SetNavigability(RelationEndType::Target)),
    ("SHOW_GRID", EditorCommand::ShowGrid),
    ("SNAP_TO_GRID", EditorCommand::SnapToGrid),
];

const APP_COMMAND_IDS: &[(&str, AppCommand)] = &[
    ("NEW", AppCommand::New),
    ("OPEN", AppCommand::Open),
    ("SAVE", AppCommand::Save),
    ("CUT", AppCommand::Cut),
    ("COPY", AppCommand::Copy),
    ("PASTE", AppCommand::Paste),
    ("DELETE", AppCommand::Delete),
];

impl EditorCommand {
    /// The identifier used by toolbar and menu resources, if the command has one.
    pub fn id(&self) -> Option<&'static str> {
        EDITOR_COMMAND_IDS.iter().find(|e| e.1 == *self).map(|e| e.0)
    }
}

impl FromStr for EditorCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EDITOR_COMMAND_IDS
            .iter()
            .find(|e| e.0 == s)
            .map(|e| e.1)
            .ok_or_else(|| CommandError::UnknownCommand(s.to_owned()))
    }
}

impl AppCommand {
    pub fn id(&self) -> Option<&'static str> {
        match self {
            AppCommand::Editor(e) => e.id(),
            other => APP_COMMAND_IDS.iter().find(|e| e.1 == *other).map(|e| e.0),
        }
    }
}

impl FromStr for AppCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match APP_COMMAND_IDS.iter().find(|e| e.0 == s) {
            Some(e) => Ok(e.1),
            None => EditorCommand::from_str(s).map(AppCommand::Editor),
        }
    }
}

/// Operations of the diagram editor that commands are dispatched to.
pub trait DiagramEditor {
    fn set_selection_mode(&mut self);
    fn undo(&mut self);
    fn redo(&mut self);
    fn redraw(&mut self);
    fn set_scaling(&mut self, scaling: Scaling);
    fn bring_to_front(&mut self);
    fn put_to_back(&mut self);
    fn edit_properties(&mut self);
    fn set_creation_mode(&mut self, element_type: ElementType);
    fn set_create_connection_mode(&mut self, relation_type: RelationType);
    fn reset_connection_points(&mut self);
    fn rectilinear_to_direct(&mut self);
    fn direct_to_rectilinear(&mut self);
    fn set_navigability(&mut self, end: RelationEndType);
    fn show_grid(&mut self, flag: bool);
    fn snap_to_grid(&mut self, flag: bool);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandHandlingStatus {
    Handled,
    NotHandled,
}

pub trait AppCommandListener: Send + Sync {
    fn handle_command(&mut self, command: AppCommand) -> CommandHandlingStatus;
}

/// Routes editor commands to the current editor.
///
/// The grid toggles are owned here, so `ShowGrid` and `SnapToGrid` flip the
/// stored flag before forwarding it.
pub struct EditorCommandDispatcher<E: DiagramEditor> {
    editor: E,
    show_grid: bool,
    snap_to_grid: bool,
}

impl<E: DiagramEditor> EditorCommandDispatcher<E> {
    pub fn new(editor: E, settings: &EditorSettings) -> Self {
        Self {
            editor,
            show_grid: settings.show_grid,
            snap_to_grid: settings.snap_to_grid,
        }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn is_grid_shown(&self) -> bool {
        self.show_grid
    }

    pub fn is_snapping_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn dispatch(&mut self, command: EditorCommand) {
        log::debug!("dispatching {:?}", command);
        let e = &mut self.editor;
        match command {
            EditorCommand::SelectMode => e.set_selection_mode(),
            EditorCommand::Undo => e.undo(),
            EditorCommand::Redo => e.redo(),
            EditorCommand::Redraw => e.redraw(),
            EditorCommand::Zoom(scaling) => e.set_scaling(scaling),
            EditorCommand::BringToFront => e.bring_to_front(),
            EditorCommand::PutToBack => e.put_to_back(),
            EditorCommand::EditProperties => e.edit_properties(),
            EditorCommand::CreateElement(element_type) => e.set_creation_mode(element_type),
            EditorCommand::CreateConnection(relation_type) => {
                e.set_create_connection_mode(relation_type)
            }
            EditorCommand::ResetPoints => e.reset_connection_points(),
            EditorCommand::RectToDirect => e.rectilinear_to_direct(),
            EditorCommand::DirectToRect => e.direct_to_rectilinear(),
            EditorCommand::SetNavigability(end) => e.set_navigability(end),
            EditorCommand::ShowGrid => {
                self.show_grid = !self.show_grid;
                e.show_grid(self.show_grid);
                e.redraw();
            }
            EditorCommand::SnapToGrid => {
                self.snap_to_grid = !self.snap_to_grid;
                e.snap_to_grid(self.snap_to_grid);
            }
        }
    }

    pub fn handle_app_command(&mut self, command: AppCommand) -> CommandHandlingStatus {
        match command {
            AppCommand::Editor(c) => {
                self.dispatch(c);
                CommandHandlingStatus::Handled
            }
            other => {
                log::debug!("{:?} is not an editor command", other);
                CommandHandlingStatus::NotHandled
            }
        }
    }

    /// Parses and dispatches a command identifier.
    pub fn handle_command_id(&mut self, id: &str) -> Result<CommandHandlingStatus, CommandError> {
        let command = id.parse::<AppCommand>().inspect_err(|_| log::warn!("not handled: {}", id))?;
        Ok(self.handle_app_command(command))
    }
}

impl<E: DiagramEditor + Send + Sync> AppCommandListener for EditorCommandDispatcher<E> {
    fn handle_command(&mut self, command: AppCommand) -> CommandHandlingStatus {
        self.handle_app_command(command)
    }
}
