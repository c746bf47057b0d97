use crate::common::canvas::{ArrowheadType, Bounds, LineType};
use crate::common::eref::{ERef, WeakERef};
use crate::common::observer::{impl_observable, ListenerRef, NodeChange, Observable};
use crate::common::uuid::ViewUuid;
use crate::structure::structure_models::{
    ElementType, RelationEndType, RelationType, UmlModelElement, UmlRelation,
};
use std::sync::Arc;

/// A node placed on a structure diagram.
///
/// Mutating methods notify the registered structural-change observers while
/// the node is locked, so observers must not lock the node back.
pub struct UmlNode {
    pub uuid: ViewUuid,
    element_type: ElementType,
    model: Option<UmlModelElement>,
    label: Arc<String>,
    bounds: Bounds,
    connections: Vec<WeakERef<UmlConnection>>,
    observers: Vec<ListenerRef>,
}

impl UmlNode {
    pub fn new(element_type: ElementType, model: Option<UmlModelElement>, bounds: Bounds) -> Self {
        Self {
            uuid: ViewUuid::now_v7(),
            element_type,
            model,
            label: Arc::new("".to_owned()),
            bounds,
            connections: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn model_element(&self) -> Option<&UmlModelElement> {
        self.model.as_ref()
    }

    pub fn label(&self) -> Arc<String> {
        self.label.clone()
    }

    /// Name of the model element, or the label for nodes without one.
    pub fn display_name(&self) -> Arc<String> {
        match &self.model {
            Some(m) => m.name(),
            None => self.label.clone(),
        }
    }

    pub fn rename(&mut self, name: String) {
        match &self.model {
            Some(m) => m.set_name(name),
            None => self.label = Arc::new(name),
        }
        self.notify_observers(NodeChange::Renamed);
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        let change = if bounds.width != self.bounds.width || bounds.height != self.bounds.height {
            NodeChange::Resized
        } else if bounds.origin != self.bounds.origin {
            NodeChange::Moved
        } else {
            return;
        };
        self.bounds = bounds;
        self.notify_observers(change);
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.set_bounds(self.bounds.translated(dx, dy));
    }

    pub fn add_connection(&mut self, connection: WeakERef<UmlConnection>) {
        self.connections.retain(WeakERef::is_alive);
        if !self.connections.iter().any(|c| c.ptr_eq(&connection)) {
            self.connections.push(connection);
        }
    }

    pub fn remove_connection(&mut self, connection: &ERef<UmlConnection>) {
        self.connections.retain(|c| c.is_alive() && !c.points_to(connection));
    }

    /// Connections attached to this node that are still alive.
    pub fn connections(&self) -> Vec<ERef<UmlConnection>> {
        self.connections.iter().filter_map(|c| c.upgrade()).collect()
    }

    pub fn is_connected_to(&self, connection: &ERef<UmlConnection>) -> bool {
        self.connections.iter().any(|c| c.points_to(connection))
    }
}

impl_observable!(UmlNode);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssociationType {
    Unspecified,
    Aggregation,
    Composition,
}

/// How a connection is routed between its nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectMethod {
    Rectilinear,
    Direct,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionShape {
    Dependency,
    Association { association_type: AssociationType },
    Inheritance { is_dashed: bool },
    NoteConnection,
}

impl ConnectionShape {
    pub fn line_type(&self) -> LineType {
        match self {
            ConnectionShape::Dependency
            | ConnectionShape::Inheritance { is_dashed: true }
            | ConnectionShape::NoteConnection => LineType::Dashed,
            ConnectionShape::Association { .. }
            | ConnectionShape::Inheritance { is_dashed: false } => LineType::Solid,
        }
    }

    pub fn source_arrowhead_type(&self) -> ArrowheadType {
        match self {
            ConnectionShape::Association { association_type: AssociationType::Aggregation } => {
                ArrowheadType::EmptyRhombus
            }
            ConnectionShape::Association { association_type: AssociationType::Composition } => {
                ArrowheadType::FullRhombus
            }
            _ => ArrowheadType::None,
        }
    }

    pub fn target_arrowhead_type(&self) -> ArrowheadType {
        match self {
            ConnectionShape::Dependency => ArrowheadType::OpenTriangle,
            ConnectionShape::Inheritance { .. } => ArrowheadType::EmptyTriangle,
            ConnectionShape::Association { .. } | ConnectionShape::NoteConnection => {
                ArrowheadType::None
            }
        }
    }
}

/// A connection between two nodes of a structure diagram.
pub struct UmlConnection {
    pub uuid: ViewUuid,
    relation_type: RelationType,
    shape: ConnectionShape,
    connect_method: ConnectMethod,
    relation: Option<ERef<UmlRelation>>,
    node1: Option<ERef<UmlNode>>,
    node2: Option<ERef<UmlNode>>,
}

impl UmlConnection {
    pub fn new(
        relation_type: RelationType,
        shape: ConnectionShape,
        connect_method: ConnectMethod,
        relation: Option<UmlRelation>,
    ) -> Self {
        Self {
            uuid: ViewUuid::now_v7(),
            relation_type,
            shape,
            connect_method,
            relation: relation.map(ERef::new),
            node1: None,
            node2: None,
        }
    }

    pub fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    pub fn shape(&self) -> ConnectionShape {
        self.shape
    }

    pub fn association_type(&self) -> Option<AssociationType> {
        match self.shape {
            ConnectionShape::Association { association_type } => Some(association_type),
            _ => None,
        }
    }

    pub fn is_dashed(&self) -> bool {
        matches!(self.shape, ConnectionShape::Inheritance { is_dashed: true })
    }

    pub fn line_type(&self) -> LineType {
        self.shape.line_type()
    }

    pub fn source_arrowhead_type(&self) -> ArrowheadType {
        self.end_arrowhead_type(RelationEndType::Source, self.shape.source_arrowhead_type())
    }

    pub fn target_arrowhead_type(&self) -> ArrowheadType {
        self.end_arrowhead_type(RelationEndType::Target, self.shape.target_arrowhead_type())
    }

    // navigable association ends without another decoration get an open arrow
    fn end_arrowhead_type(&self, end: RelationEndType, fixed: ArrowheadType) -> ArrowheadType {
        match (self.shape, fixed, &self.relation) {
            (ConnectionShape::Association { .. }, ArrowheadType::None, Some(r))
                if r.read().is_navigable(end) =>
            {
                ArrowheadType::OpenTriangle
            }
            _ => fixed,
        }
    }

    pub fn connect_method(&self) -> ConnectMethod {
        self.connect_method
    }

    pub fn set_connect_method(&mut self, connect_method: ConnectMethod) {
        self.connect_method = connect_method;
    }

    pub fn relation(&self) -> Option<&ERef<UmlRelation>> {
        self.relation.as_ref()
    }

    pub fn model_element(&self) -> Option<UmlModelElement> {
        self.relation.clone().map(UmlModelElement::from)
    }

    pub fn node1(&self) -> Option<&ERef<UmlNode>> {
        self.node1.as_ref()
    }

    pub fn node2(&self) -> Option<&ERef<UmlNode>> {
        self.node2.as_ref()
    }

    pub(crate) fn set_nodes(&mut self, node1: ERef<UmlNode>, node2: ERef<UmlNode>) {
        self.node1 = Some(node1);
        self.node2 = Some(node2);
    }
}
