use crate::common::eref::ERef;
use crate::common::fluent::translate;
use crate::editor::editor_commands::{AppCommand, AppCommandListener, CommandError};
use fluent_bundle::{FluentBundle, FluentResource};
use serde::Deserialize;
use std::collections::HashMap;

const MAIN_TOOLBAR: &str = include_str!("resources/main_toolbar.toml");
const STATIC_STRUCTURE_TOOLBAR: &str = include_str!("resources/static_structure_toolbar.toml");

#[derive(Debug, thiserror::Error)]
pub enum ToolbarError {
    #[error("invalid toolbar definition: {0}")]
    InvalidDefinition(#[from] toml::de::Error),
    #[error("{context}: {source}")]
    InvalidCommand {
        context: String,
        #[source]
        source: CommandError,
    },
    #[error("no tooltip message {0:?}")]
    MissingTooltip(String),
    #[error("more than one button for {0:?}")]
    DuplicateCommand(AppCommand),
    #[error("no button for {0:?}")]
    UnknownButton(AppCommand),
}

#[derive(Deserialize)]
struct ToolbarDefinition {
    prefix: String,
    #[serde(default)]
    initial_selection: Option<String>,
    #[serde(default)]
    disabled: Vec<String>,
    items: Vec<ItemDefinition>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ItemDefinition {
    Button { name: String, command: String, icon: String },
    Toggle { name: String, command: String, icon: String },
    Separator,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToolbarButton {
    pub name: String,
    pub command: AppCommand,
    pub icon: String,
    pub tooltip: String,
    pub toggle: bool,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToolbarItem {
    Button(ToolbarButton),
    Separator,
}

/// A toolbar whose buttons emit [`AppCommand`]s to the registered listeners.
///
/// Toggle buttons of one toolbar form a single group: clicking one selects
/// it and deselects the previous one.
pub struct ToolbarManager {
    items: Vec<ToolbarItem>,
    button_map: HashMap<AppCommand, usize>,
    selected: Option<AppCommand>,
    listeners: Vec<ERef<dyn AppCommandListener>>,
}

fn parse_command(id: &str, context: &str) -> Result<AppCommand, ToolbarError> {
    id.parse().map_err(|source| ToolbarError::InvalidCommand {
        context: context.to_owned(),
        source,
    })
}

impl ToolbarManager {
    pub fn main_toolbar(bundle: &FluentBundle<FluentResource>) -> Result<Self, ToolbarError> {
        Self::from_definition(MAIN_TOOLBAR, bundle)
    }

    pub fn static_structure_toolbar(
        bundle: &FluentBundle<FluentResource>,
    ) -> Result<Self, ToolbarError> {
        Self::from_definition(STATIC_STRUCTURE_TOOLBAR, bundle)
    }

    pub fn from_definition(
        source: &str,
        bundle: &FluentBundle<FluentResource>,
    ) -> Result<Self, ToolbarError> {
        let definition: ToolbarDefinition = toml::from_str(source)?;

        let mut toolbar = Self {
            items: Vec::with_capacity(definition.items.len()),
            button_map: HashMap::new(),
            selected: None,
            listeners: Vec::new(),
        };

        for item in definition.items {
            let (name, command, icon, toggle) = match item {
                ItemDefinition::Separator => {
                    toolbar.items.push(ToolbarItem::Separator);
                    continue;
                }
                ItemDefinition::Button { name, command, icon } => (name, command, icon, false),
                ItemDefinition::Toggle { name, command, icon } => (name, command, icon, true),
            };
            let command = parse_command(&command, &name)?;
            let msg_name = format!("{}-{}-tooltip", definition.prefix, name);
            let tooltip =
                translate(bundle, &msg_name).ok_or(ToolbarError::MissingTooltip(msg_name))?;

            if toolbar.button_map.insert(command, toolbar.items.len()).is_some() {
                return Err(ToolbarError::DuplicateCommand(command));
            }
            toolbar.items.push(ToolbarItem::Button(ToolbarButton {
                name,
                command,
                icon,
                tooltip,
                toggle,
                enabled: true,
            }));
        }

        for id in &definition.disabled {
            toolbar.set_enabled(parse_command(id, "disabled")?, false)?;
        }
        if let Some(id) = &definition.initial_selection {
            toolbar.do_click(parse_command(id, "initial_selection")?)?;
        }

        log::debug!("toolbar {} built with {} items", definition.prefix, toolbar.items.len());
        Ok(toolbar)
    }

    pub fn items(&self) -> &[ToolbarItem] {
        &self.items
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ToolbarButton> {
        self.items.iter().filter_map(|e| match e {
            ToolbarItem::Button(b) => Some(b),
            ToolbarItem::Separator => None,
        })
    }

    pub fn button(&self, command: AppCommand) -> Option<&ToolbarButton> {
        match self.items.get(*self.button_map.get(&command)?) {
            Some(ToolbarItem::Button(b)) => Some(b),
            _ => None,
        }
    }

    fn button_mut(&mut self, command: AppCommand) -> Result<&mut ToolbarButton, ToolbarError> {
        let index = *self.button_map.get(&command).ok_or(ToolbarError::UnknownButton(command))?;
        match self.items.get_mut(index) {
            Some(ToolbarItem::Button(b)) => Ok(b),
            _ => Err(ToolbarError::UnknownButton(command)),
        }
    }

    /// The currently selected toggle button.
    pub fn selected(&self) -> Option<AppCommand> {
        self.selected
    }

    pub fn set_enabled(&mut self, command: AppCommand, flag: bool) -> Result<(), ToolbarError> {
        self.button_mut(command)?.enabled = flag;
        Ok(())
    }

    /// Presses the button; disabled buttons ignore the click.
    pub fn do_click(&mut self, command: AppCommand) -> Result<(), ToolbarError> {
        let button = self.button_mut(command)?;
        if !button.enabled {
            log::debug!("ignoring click on disabled button {}", button.name);
            return Ok(());
        }
        if button.toggle {
            self.selected = Some(command);
        }
        self.action_performed(command);
        Ok(())
    }

    pub fn add_command_listener(&mut self, listener: ERef<dyn AppCommandListener>) {
        self.listeners.push(listener);
    }

    pub fn remove_command_listener(&mut self, listener: &ERef<dyn AppCommandListener>) {
        self.listeners.retain(|l| l != listener);
    }

    fn action_performed(&self, command: AppCommand) {
        for l in &self.listeners {
            l.write().handle_command(command);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::fluent::create_fluent_bundle;
    use crate::editor::editor_commands::{
        CommandHandlingStatus, DiagramEditor, EditorCommand, EditorCommandDispatcher, Scaling,
    };
    use crate::editor::settings::EditorSettings;
    use crate::structure::structure_models::{ElementType, RelationEndType, RelationType};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, RwLock};
    use unic_langid::langid;

    fn bundle() -> FluentBundle<FluentResource> {
        create_fluent_bundle(&[langid!("en-US")]).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        commands: Vec<AppCommand>,
    }

    impl AppCommandListener for Recorder {
        fn handle_command(&mut self, command: AppCommand) -> CommandHandlingStatus {
            self.commands.push(command);
            CommandHandlingStatus::Handled
        }
    }

    fn listener<T: AppCommandListener + 'static>(
        inner: &Arc<RwLock<T>>,
    ) -> ERef<dyn AppCommandListener> {
        let inner: Arc<RwLock<dyn AppCommandListener>> = inner.clone();
        ERef::from_arc(inner)
    }

    fn editor_command(c: EditorCommand) -> AppCommand {
        c.into()
    }

    #[test]
    fn test_static_structure_toolbar() {
        let toolbar = ToolbarManager::static_structure_toolbar(&bundle()).unwrap();
        assert_eq!(toolbar.items().len(), 14);
        assert_eq!(toolbar.buttons().count(), 12);
        assert!(toolbar.buttons().all(|b| b.toggle && b.enabled));
        assert_eq!(toolbar.selected(), Some(editor_command(EditorCommand::SelectMode)));
        assert_eq!(toolbar.items()[4], ToolbarItem::Separator);

        let class_command = editor_command(EditorCommand::CreateElement(ElementType::Class));
        let class = toolbar.button(class_command).unwrap();
        assert_eq!(class.name, "class");
        assert_eq!(class.icon, "class.png");
        assert_eq!(class.tooltip, "Create class");
    }

    #[test]
    fn test_main_toolbar() {
        let toolbar = ToolbarManager::main_toolbar(&bundle()).unwrap();
        assert_eq!(toolbar.selected(), None);
        let enabled: Vec<_> =
            toolbar.buttons().filter(|b| b.enabled).map(|b| b.name.as_str()).collect();
        assert_eq!(enabled, vec!["new", "open", "save"]);
        assert!(!toolbar.button(editor_command(EditorCommand::Undo)).unwrap().enabled);
    }

    #[test]
    fn test_toggle_group_and_listeners() {
        let mut toolbar = ToolbarManager::static_structure_toolbar(&bundle()).unwrap();
        let recorder = Arc::new(RwLock::new(Recorder::default()));
        toolbar.add_command_listener(listener(&recorder));

        let composition =
            editor_command(EditorCommand::CreateConnection(RelationType::Composition));
        toolbar.do_click(composition).unwrap();
        assert_eq!(toolbar.selected(), Some(composition));
        assert_eq!(recorder.read().unwrap().commands, vec![composition]);

        toolbar.remove_command_listener(&listener(&recorder));
        toolbar.do_click(editor_command(EditorCommand::SelectMode)).unwrap();
        assert_eq!(recorder.read().unwrap().commands.len(), 1);
    }

    #[test]
    fn test_disabled_button_does_not_fire() {
        let mut toolbar = ToolbarManager::main_toolbar(&bundle()).unwrap();
        let recorder = Arc::new(RwLock::new(Recorder::default()));
        toolbar.add_command_listener(listener(&recorder));

        toolbar.do_click(AppCommand::Cut).unwrap();
        assert!(recorder.read().unwrap().commands.is_empty());

        toolbar.set_enabled(AppCommand::Cut, true).unwrap();
        toolbar.do_click(AppCommand::Cut).unwrap();
        toolbar.do_click(AppCommand::Save).unwrap();
        assert_eq!(recorder.read().unwrap().commands, vec![AppCommand::Cut, AppCommand::Save]);
        assert_eq!(toolbar.selected(), None);
    }

    #[test]
    fn test_unknown_button() {
        let mut toolbar = ToolbarManager::main_toolbar(&bundle()).unwrap();
        let redraw = editor_command(EditorCommand::Redraw);
        assert!(matches!(
            toolbar.set_enabled(redraw, false),
            Err(ToolbarError::UnknownButton(c)) if c == redraw,
        ));
        assert!(toolbar.do_click(redraw).is_err());
    }

    #[test]
    fn test_invalid_definitions() {
        let b = bundle();
        assert!(matches!(
            ToolbarManager::from_definition("prefix = 1", &b),
            Err(ToolbarError::InvalidDefinition(_)),
        ));
        let unknown_command = r#"
            prefix = "maintoolbar"
            [[items]]
            type = "button"
            name = "new"
            command = "EXPLODE"
            icon = "new.png"
        "#;
        assert!(matches!(
            ToolbarManager::from_definition(unknown_command, &b),
            Err(ToolbarError::InvalidCommand { .. }),
        ));
        let missing_tooltip = r#"
            prefix = "maintoolbar"
            [[items]]
            type = "button"
            name = "print"
            command = "SAVE"
            icon = "print.png"
        "#;
        assert!(matches!(
            ToolbarManager::from_definition(missing_tooltip, &b),
            Err(ToolbarError::MissingTooltip(m)) if m == "maintoolbar-print-tooltip",
        ));
        let duplicate = r#"
            prefix = "maintoolbar"
            [[items]]
            type = "button"
            name = "new"
            command = "NEW"
            icon = "new.png"
            [[items]]
            type = "button"
            name = "open"
            command = "NEW"
            icon = "open.png"
        "#;
        assert!(matches!(
            ToolbarManager::from_definition(duplicate, &b),
            Err(ToolbarError::DuplicateCommand(AppCommand::New)),
        ));
    }

    #[test]
    fn test_localized_tooltips() {
        let b = create_fluent_bundle(&[langid!("cs-CZ"), langid!("en-US")]).unwrap();
        let toolbar = ToolbarManager::main_toolbar(&b).unwrap();
        assert_eq!(toolbar.button(AppCommand::Save).unwrap().tooltip, "Uložit model");
    }

    #[derive(Default)]
    struct ModeEditor {
        creation_mode: Option<ElementType>,
        connection_mode: Option<RelationType>,
        selection_mode: bool,
    }

    impl DiagramEditor for ModeEditor {
        fn set_selection_mode(&mut self) {
            self.selection_mode = true;
            self.creation_mode = None;
            self.connection_mode = None;
        }
        fn undo(&mut self) {}
        fn redo(&mut self) {}
        fn redraw(&mut self) {}
        fn set_scaling(&mut self, _scaling: Scaling) {}
        fn bring_to_front(&mut self) {}
        fn put_to_back(&mut self) {}
        fn edit_properties(&mut self) {}
        fn set_creation_mode(&mut self, element_type: ElementType) {
            self.selection_mode = false;
            self.creation_mode = Some(element_type);
        }
        fn set_create_connection_mode(&mut self, relation_type: RelationType) {
            self.selection_mode = false;
            self.connection_mode = Some(relation_type);
        }
        fn reset_connection_points(&mut self) {}
        fn rectilinear_to_direct(&mut self) {}
        fn direct_to_rectilinear(&mut self) {}
        fn set_navigability(&mut self, _end: RelationEndType) {}
        fn show_grid(&mut self, _flag: bool) {}
        fn snap_to_grid(&mut self, _flag: bool) {}
    }

    #[test]
    fn test_toolbar_drives_editor() {
        let mut toolbar = ToolbarManager::static_structure_toolbar(&bundle()).unwrap();
        let dispatcher = Arc::new(RwLock::new(EditorCommandDispatcher::new(
            ModeEditor::default(),
            &EditorSettings::default(),
        )));
        toolbar.add_command_listener(listener(&dispatcher));

        let package = editor_command(EditorCommand::CreateElement(ElementType::Package));
        toolbar.do_click(package).unwrap();
        assert_eq!(dispatcher.read().unwrap().editor().creation_mode, Some(ElementType::Package));

        toolbar.do_click(editor_command(EditorCommand::SelectMode)).unwrap();
        assert!(dispatcher.read().unwrap().editor().selection_mode);
        assert_eq!(dispatcher.read().unwrap().editor().creation_mode, None);
    }
}
