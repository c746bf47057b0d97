use crate::common::eref::ERef;
use crate::common::observer::{ListenerRef, NodeChange, NodeChangeListener};
use crate::common::uuid::{ModelUuid, ViewUuid};
use crate::structure::structure_views::{UmlConnection, UmlNode};
use std::sync::{Arc, RwLock, Weak};

/// Structural changes reported by the nodes of one diagram.
///
/// Kept behind its own lock, so nodes can report while the diagram is locked.
struct NodeChangeLog {
    diagram: ModelUuid,
    changes: Vec<(ViewUuid, NodeChange)>,
}

impl NodeChangeListener for NodeChangeLog {
    fn node_changed(&mut self, node: ViewUuid, change: NodeChange) {
        log::debug!("diagram {} notified of {:?} on node {}", self.diagram, change, node);
        self.changes.push((node, change));
    }
}

/// Static structure diagram, owning the nodes and connections placed on it.
pub struct StructureDiagram {
    pub uuid: Arc<ModelUuid>,
    pub name: Arc<String>,
    nodes: Vec<ERef<UmlNode>>,
    connections: Vec<ERef<UmlConnection>>,
    node_changes: ERef<NodeChangeLog>,

    pub comment: Arc<String>,
}

impl StructureDiagram {
    pub fn new(uuid: ModelUuid, name: String) -> Self {
        Self {
            uuid: Arc::new(uuid),
            name: Arc::new(name),
            nodes: Vec::new(),
            connections: Vec::new(),
            node_changes: ERef::new(NodeChangeLog { diagram: uuid, changes: Vec::new() }),
            comment: Arc::new("".to_owned()),
        }
    }

    /// Handle under which the diagram observes its nodes.
    pub fn listener(&self) -> ListenerRef {
        let weak: Weak<RwLock<dyn NodeChangeListener>> =
            self.node_changes.downgrade().into_inner();
        weak.into()
    }

    pub fn add_node(&mut self, node: ERef<UmlNode>) {
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    pub fn add_connection(&mut self, connection: ERef<UmlConnection>) {
        if !self.connections.contains(&connection) {
            self.connections.push(connection);
        }
    }

    /// Removes the connection and detaches it from its endpoint nodes.
    pub fn remove_connection(&mut self, connection: &ERef<UmlConnection>) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c != connection);
        if self.connections.len() == before {
            return false;
        }
        let c = connection.read();
        for node in c.node1().into_iter().chain(c.node2()) {
            node.write().remove_connection(connection);
        }
        true
    }

    pub fn nodes(&self) -> &[ERef<UmlNode>] {
        &self.nodes
    }

    pub fn connections(&self) -> &[ERef<UmlConnection>] {
        &self.connections
    }

    pub fn find_node(&self, uuid: &ViewUuid) -> Option<ERef<UmlNode>> {
        self.nodes.iter().find(|n| n.read().uuid == *uuid).cloned()
    }

    /// Drains the structural changes reported by nodes, in arrival order.
    pub fn take_node_changes(&self) -> Vec<(ViewUuid, NodeChange)> {
        std::mem::take(&mut self.node_changes.write().changes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::canvas::Bounds;
    use crate::common::observer::Observable;
    use crate::structure::structure_models::ElementType;
    use pretty_assertions::assert_eq;

    fn new_diagram() -> ERef<StructureDiagram> {
        ERef::new(StructureDiagram::new(ModelUuid::now_v7(), "d".to_owned()))
    }

    fn new_note() -> ERef<UmlNode> {
        ERef::new(UmlNode::new(ElementType::Note, None, Bounds::new(0.0, 0.0, 10.0, 10.0)))
    }

    #[test]
    fn test_diagram_observes_nodes() {
        let diagram = new_diagram();
        let node = new_note();
        node.write().register_observer(diagram.read().listener());
        diagram.write().add_node(node.clone());
        diagram.write().add_node(node.clone());
        assert_eq!(diagram.read().nodes().len(), 1);

        let node_uuid = node.read().uuid;
        node.write().move_by(1.0, 2.0);
        node.write().rename("n".to_owned());
        assert_eq!(
            diagram.read().take_node_changes(),
            vec![(node_uuid, NodeChange::Moved), (node_uuid, NodeChange::Renamed)],
        );
        assert!(diagram.read().take_node_changes().is_empty());
        assert_eq!(diagram.read().find_node(&node_uuid), Some(node));
    }

    #[test]
    fn test_nodes_change_while_diagram_is_locked() {
        let diagram = new_diagram();
        let node = new_note();
        node.write().register_observer(diagram.read().listener());
        diagram.write().add_node(node.clone());

        {
            let d = diagram.read();
            for n in d.nodes() {
                n.write().move_by(1.0, 1.0);
            }
        }
        {
            let mut d = diagram.write();
            d.nodes()[0].write().set_bounds(Bounds::new(1.0, 1.0, 20.0, 10.0));
            d.add_node(new_note());
        }

        let uuid = node.read().uuid;
        assert_eq!(
            diagram.read().take_node_changes(),
            vec![(uuid, NodeChange::Moved), (uuid, NodeChange::Resized)],
        );
    }
}
