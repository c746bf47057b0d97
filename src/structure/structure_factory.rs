use crate::common::canvas::Bounds;
use crate::common::eref::ERef;
use crate::common::observer::{ListenerRef, Observable};
use crate::common::uuid::ModelUuid;
use crate::structure::structure_diagram::StructureDiagram;
use crate::structure::structure_models::{
    ElementType, RelationEndType, RelationType, UmlClass, UmlComponent, UmlPackage, UmlRelation,
};
use crate::structure::structure_views::{
    AssociationType, ConnectMethod, ConnectionShape, UmlConnection, UmlNode,
};
use std::collections::HashMap;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("unsupported element kind {0:?}")]
    UnsupportedElementKind(ElementType),
}

type NodeConstructor = fn() -> UmlNode;
type ConnectionConstructor = fn(ConnectMethod) -> UmlConnection;

fn new_note() -> UmlNode {
    UmlNode::new(ElementType::Note, None, Bounds::new(0.0, 0.0, 120.0, 60.0))
}

fn new_package() -> UmlNode {
    let package = ERef::new(UmlPackage::new(ModelUuid::now_v7(), "Package 1".to_owned()));
    UmlNode::new(ElementType::Package, Some(package.into()), Bounds::new(0.0, 0.0, 140.0, 100.0))
}

fn new_component() -> UmlNode {
    let component = ERef::new(UmlComponent::new(ModelUuid::now_v7(), "Component 1".to_owned()));
    UmlNode::new(ElementType::Component, Some(component.into()), Bounds::new(0.0, 0.0, 120.0, 70.0))
}

fn new_class() -> UmlNode {
    let class = ERef::new(UmlClass::new(ModelUuid::now_v7(), "Class 1".to_owned()));
    UmlNode::new(ElementType::Class, Some(class.into()), Bounds::new(0.0, 0.0, 100.0, 80.0))
}

fn new_dependency(connect_method: ConnectMethod) -> UmlConnection {
    UmlConnection::new(
        RelationType::Dependency,
        ConnectionShape::Dependency,
        connect_method,
        Some(UmlRelation::not_navigable()),
    )
}

fn new_association(connect_method: ConnectMethod) -> UmlConnection {
    UmlConnection::new(
        RelationType::Association,
        ConnectionShape::Association { association_type: AssociationType::Unspecified },
        connect_method,
        Some(UmlRelation::fully_navigable()),
    )
}

fn new_composition(connect_method: ConnectMethod) -> UmlConnection {
    UmlConnection::new(
        RelationType::Composition,
        ConnectionShape::Association { association_type: AssociationType::Composition },
        connect_method,
        Some(UmlRelation::target_navigable()),
    )
}

fn new_aggregation(connect_method: ConnectMethod) -> UmlConnection {
    UmlConnection::new(
        RelationType::Aggregation,
        ConnectionShape::Association { association_type: AssociationType::Aggregation },
        connect_method,
        Some(UmlRelation::target_navigable()),
    )
}

fn new_inheritance(connect_method: ConnectMethod) -> UmlConnection {
    UmlConnection::new(
        RelationType::Inheritance,
        ConnectionShape::Inheritance { is_dashed: false },
        connect_method,
        Some(UmlRelation::not_navigable()),
    )
}

fn new_interface_realization(connect_method: ConnectMethod) -> UmlConnection {
    UmlConnection::new(
        RelationType::InterfaceRealization,
        ConnectionShape::Inheritance { is_dashed: true },
        connect_method,
        Some(UmlRelation::not_navigable()),
    )
}

fn new_note_connection(connect_method: ConnectMethod) -> UmlConnection {
    UmlConnection::new(
        RelationType::NoteConnector,
        ConnectionShape::NoteConnection,
        connect_method,
        None,
    )
}

/// Creates nodes and connections for one structure diagram.
///
/// Every created node is observed by the diagram; every created connection is
/// bound to its endpoint nodes and, through its relation, to their model
/// elements before it is handed out.
pub struct DiagramElementFactory {
    element_constructors: HashMap<ElementType, NodeConstructor>,
    connection_constructors: HashMap<RelationType, (ConnectionConstructor, ConnectMethod)>,
    diagram: ListenerRef,
}

impl DiagramElementFactory {
    pub fn new(diagram: &ERef<StructureDiagram>) -> Self {
        let element_constructors: HashMap<ElementType, NodeConstructor> = HashMap::from([
            (ElementType::Note, new_note as NodeConstructor),
            (ElementType::Package, new_package as NodeConstructor),
            (ElementType::Component, new_component as NodeConstructor),
            (ElementType::Class, new_class as NodeConstructor),
        ]);
        let connection_constructors = HashMap::from([
            (
                RelationType::Dependency,
                (new_dependency as ConnectionConstructor, ConnectMethod::Rectilinear),
            ),
            (
                RelationType::Association,
                (new_association as ConnectionConstructor, ConnectMethod::Rectilinear),
            ),
            (
                RelationType::Composition,
                (new_composition as ConnectionConstructor, ConnectMethod::Rectilinear),
            ),
            (
                RelationType::Aggregation,
                (new_aggregation as ConnectionConstructor, ConnectMethod::Rectilinear),
            ),
            (
                RelationType::Inheritance,
                (new_inheritance as ConnectionConstructor, ConnectMethod::Rectilinear),
            ),
            (
                RelationType::InterfaceRealization,
                (new_interface_realization as ConnectionConstructor, ConnectMethod::Rectilinear),
            ),
            (
                RelationType::NoteConnector,
                (new_note_connection as ConnectionConstructor, ConnectMethod::Direct),
            ),
        ]);

        Self {
            element_constructors,
            connection_constructors,
            diagram: diagram.read().listener(),
        }
    }

    pub fn supports_element(&self, element_type: ElementType) -> bool {
        self.element_constructors.contains_key(&element_type)
    }

    pub fn supports_relation(&self, relation_type: RelationType) -> bool {
        self.connection_constructors.contains_key(&relation_type)
    }

    pub fn create_node(&self, element_type: ElementType) -> Result<ERef<UmlNode>, FactoryError> {
        let Some(constructor) = self.element_constructors.get(&element_type) else {
            log::warn!("no node constructor for {:?}", element_type);
            return Err(FactoryError::UnsupportedElementKind(element_type));
        };
        let mut node = constructor();
        node.register_observer(self.diagram.clone());
        log::debug!("created {:?} node {}", element_type, node.uuid);
        Ok(ERef::new(node))
    }

    /// Returns `None` for relation kinds this diagram does not support,
    /// leaving both nodes untouched.
    pub fn create_connection(
        &self,
        relation_type: RelationType,
        node1: &ERef<UmlNode>,
        node2: &ERef<UmlNode>,
    ) -> Option<ERef<UmlConnection>> {
        let (constructor, connect_method) = self.connection_constructors.get(&relation_type)?;
        let connection = ERef::new(constructor(*connect_method));
        Self::bind_connection(&connection, node1, node2);
        log::debug!("created {:?} connection {}", relation_type, connection.read().uuid);
        Some(connection)
    }

    pub fn connect_method(&self, relation_type: RelationType) -> Option<ConnectMethod> {
        self.connection_constructors.get(&relation_type).map(|e| e.1)
    }

    fn bind_connection(
        connection: &ERef<UmlConnection>,
        node1: &ERef<UmlNode>,
        node2: &ERef<UmlNode>,
    ) {
        let mut c = connection.write();
        c.set_nodes(node1.clone(), node2.clone());
        node1.write().add_connection(connection.downgrade());
        node2.write().add_connection(connection.downgrade());
        if let Some(relation) = c.relation() {
            let mut r = relation.write();
            r.set_element(RelationEndType::Source, node1.read().model_element().cloned());
            r.set_element(RelationEndType::Target, node2.read().model_element().cloned());
        }
    }
}
