use crate::common::eref::{ERef, WeakERef};
use crate::common::uuid::ModelUuid;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Note,
    Package,
    Component,
    Class,
    Actor,
    UseCase,
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Note => "Note",
            ElementType::Package => "Package",
            ElementType::Component => "Component",
            ElementType::Class => "Class",
            ElementType::Actor => "Actor",
            ElementType::UseCase => "Use Case",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationType {
    Dependency,
    Association,
    Composition,
    Aggregation,
    Inheritance,
    InterfaceRealization,
    NoteConnector,
    Include,
    Extend,
}

impl RelationType {
    pub fn name(&self) -> &'static str {
        match self {
            RelationType::Dependency => "Dependency",
            RelationType::Association => "Association",
            RelationType::Composition => "Composition",
            RelationType::Aggregation => "Aggregation",
            RelationType::Inheritance => "Inheritance",
            RelationType::InterfaceRealization => "Interface Realization",
            RelationType::NoteConnector => "Note Connector",
            RelationType::Include => "Include",
            RelationType::Extend => "Extend",
        }
    }
}

/// End of a relation: source is element 1, target is element 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationEndType {
    Source,
    Target,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, derive_more::From)]
pub enum UmlModelElement {
    UmlPackage(ERef<UmlPackage>),
    UmlClass(ERef<UmlClass>),
    UmlComponent(ERef<UmlComponent>),
    UmlRelation(ERef<UmlRelation>),
}

macro_rules! with_element {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            UmlModelElement::UmlPackage($inner) => $body,
            UmlModelElement::UmlClass($inner) => $body,
            UmlModelElement::UmlComponent($inner) => $body,
            UmlModelElement::UmlRelation($inner) => $body,
        }
    };
}

impl UmlModelElement {
    pub fn uuid(&self) -> ModelUuid {
        with_element!(self, inner => *inner.read().uuid)
    }
    pub fn name(&self) -> Arc<String> {
        with_element!(self, inner => inner.read().name.clone())
    }
    pub fn set_name(&self, name: String) {
        with_element!(self, inner => inner.write().name = Arc::new(name))
    }
    pub fn namespace(&self) -> Option<ERef<UmlPackage>> {
        with_element!(self, inner => inner.read().namespace.as_ref().and_then(|e| e.upgrade()))
    }
    /// An element without a parent namespace belongs to the model's top level.
    pub fn is_top_level(&self) -> bool {
        self.namespace().is_none()
    }
    fn set_namespace(&self, namespace: Option<WeakERef<UmlPackage>>) {
        with_element!(self, inner => inner.write().namespace = namespace)
    }
}

pub struct UmlPackage {
    pub uuid: Arc<ModelUuid>,
    pub name: Arc<String>,
    pub namespace: Option<WeakERef<UmlPackage>>,
    pub contained_elements: Vec<UmlModelElement>,

    pub comment: Arc<String>,
}

impl UmlPackage {
    pub fn new(uuid: ModelUuid, name: String) -> Self {
        Self {
            uuid: Arc::new(uuid),
            name: Arc::new(name),
            namespace: None,
            contained_elements: Vec::new(),
            comment: Arc::new("".to_owned()),
        }
    }

    /// Moves `element` into `package`, detaching it from its previous
    /// namespace. Returns false if the element is the package itself.
    pub fn add_element(package: &ERef<UmlPackage>, element: UmlModelElement) -> bool {
        if let UmlModelElement::UmlPackage(p) = &element {
            if p == package {
                log::warn!("refusing to nest package {} into itself", *package.read().uuid);
                return false;
            }
        }
        if let Some(previous) = element.namespace() {
            previous.write().contained_elements.retain(|e| *e != element);
        }
        element.set_namespace(Some(package.downgrade()));
        package.write().contained_elements.push(element);
        true
    }

    pub fn remove_element(package: &ERef<UmlPackage>, element: &UmlModelElement) -> bool {
        let mut p = package.write();
        let before = p.contained_elements.len();
        p.contained_elements.retain(|e| e != element);
        let removed = p.contained_elements.len() != before;
        drop(p);
        if removed {
            element.set_namespace(None);
        }
        removed
    }
}

pub struct UmlClass {
    pub uuid: Arc<ModelUuid>,
    pub name: Arc<String>,
    pub namespace: Option<WeakERef<UmlPackage>>,
    pub stereotype: Arc<String>,
    pub is_abstract: bool,
    pub properties: Arc<String>,
    pub functions: Arc<String>,

    pub comment: Arc<String>,
}

impl UmlClass {
    pub fn new(uuid: ModelUuid, name: String) -> Self {
        Self {
            uuid: Arc::new(uuid),
            name: Arc::new(name),
            namespace: None,
            stereotype: Arc::new("".to_owned()),
            is_abstract: false,
            properties: Arc::new("".to_owned()),
            functions: Arc::new("".to_owned()),
            comment: Arc::new("".to_owned()),
        }
    }
}

pub struct UmlComponent {
    pub uuid: Arc<ModelUuid>,
    pub name: Arc<String>,
    pub namespace: Option<WeakERef<UmlPackage>>,

    pub comment: Arc<String>,
}

impl UmlComponent {
    pub fn new(uuid: ModelUuid, name: String) -> Self {
        Self {
            uuid: Arc::new(uuid),
            name: Arc::new(name),
            namespace: None,
            comment: Arc::new("".to_owned()),
        }
    }
}

/// Semantic counterpart of a connection.
///
/// Whether the user may change navigability is fixed per end when the
/// relation is constructed; see [`UmlRelation::not_navigable`],
/// [`UmlRelation::fully_navigable`] and [`UmlRelation::target_navigable`].
pub struct UmlRelation {
    pub uuid: Arc<ModelUuid>,
    pub name: Arc<String>,
    pub namespace: Option<WeakERef<UmlPackage>>,
    element1: Option<UmlModelElement>,
    element2: Option<UmlModelElement>,
    element1_navigable: bool,
    element2_navigable: bool,
    can_set_element1_navigability: bool,
    can_set_element2_navigability: bool,
}

impl UmlRelation {
    fn new(can_set_element1_navigability: bool, can_set_element2_navigability: bool) -> Self {
        Self {
            uuid: Arc::new(ModelUuid::now_v7()),
            name: Arc::new("".to_owned()),
            namespace: None,
            element1: None,
            element2: None,
            element1_navigable: false,
            element2_navigable: false,
            can_set_element1_navigability,
            can_set_element2_navigability,
        }
    }

    pub fn not_navigable() -> Self {
        Self::new(false, false)
    }

    pub fn fully_navigable() -> Self {
        Self::new(true, true)
    }

    pub fn target_navigable() -> Self {
        Self::new(false, true)
    }

    pub fn element(&self, end: RelationEndType) -> Option<&UmlModelElement> {
        match end {
            RelationEndType::Source => self.element1.as_ref(),
            RelationEndType::Target => self.element2.as_ref(),
        }
    }

    pub fn set_element(&mut self, end: RelationEndType, element: Option<UmlModelElement>) {
        match end {
            RelationEndType::Source => self.element1 = element,
            RelationEndType::Target => self.element2 = element,
        }
    }

    pub fn can_set_navigability(&self, end: RelationEndType) -> bool {
        match end {
            RelationEndType::Source => self.can_set_element1_navigability,
            RelationEndType::Target => self.can_set_element2_navigability,
        }
    }

    pub fn is_navigable(&self, end: RelationEndType) -> bool {
        match end {
            RelationEndType::Source => self.element1_navigable,
            RelationEndType::Target => self.element2_navigable,
        }
    }

    /// Returns false, leaving the relation untouched, if the end is fixed.
    pub fn set_navigability(&mut self, end: RelationEndType, navigable: bool) -> bool {
        if !self.can_set_navigability(end) {
            log::warn!("navigability of {:?} end of relation {} is fixed", end, *self.uuid);
            return false;
        }
        match end {
            RelationEndType::Source => self.element1_navigable = navigable,
            RelationEndType::Target => self.element2_navigable = navigable,
        }
        true
    }
}
