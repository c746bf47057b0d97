use crate::common::eref::ERef;
use crate::structure::structure_diagram::StructureDiagram;
use crate::structure::structure_models::UmlModelElement;
use std::collections::HashSet;

/// The model of one document: its top-level elements and its diagrams.
///
/// A top-level element is an element without a parent namespace.
#[derive(Default)]
pub struct UmlModel {
    main_elements: HashSet<UmlModelElement>,
    diagrams: Vec<ERef<StructureDiagram>>,
}

impl UmlModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, element: UmlModelElement) {
        if !element.is_top_level() {
            log::warn!(
                "element {} added to the top level while nested in a package",
                element.uuid(),
            );
        }
        self.main_elements.insert(element);
    }

    pub fn contains(&self, element: &UmlModelElement) -> bool {
        self.main_elements.contains(element)
    }

    pub fn elements(&self) -> &HashSet<UmlModelElement> {
        &self.main_elements
    }

    pub fn add_diagram(&mut self, diagram: ERef<StructureDiagram>) {
        self.diagrams.push(diagram);
    }

    pub fn diagrams(&self) -> &[ERef<StructureDiagram>] {
        &self.diagrams
    }
}

impl std::fmt::Display for UmlModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UML model")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::uuid::ModelUuid;
    use crate::structure::structure_models::{UmlClass, UmlPackage};
    use pretty_assertions::assert_eq;

    fn new_class(name: &str) -> UmlModelElement {
        ERef::new(UmlClass::new(ModelUuid::now_v7(), name.to_owned())).into()
    }

    fn new_diagram(name: &str) -> ERef<StructureDiagram> {
        ERef::new(StructureDiagram::new(ModelUuid::now_v7(), name.to_owned()))
    }

    #[test]
    fn test_add_element_is_idempotent() {
        let mut model = UmlModel::new();
        let x = new_class("X");
        model.add_element(x.clone());
        model.add_element(x.clone());

        assert_eq!(model.elements().len(), 1);
        assert!(model.elements().contains(&x));
        assert!(model.contains(&x));
    }

    #[test]
    fn test_contains_uses_identity() {
        let mut model = UmlModel::new();
        model.add_element(new_class("X"));
        // same name, different element
        assert!(!model.contains(&new_class("X")));
    }

    #[test]
    fn test_contains_is_top_level_only() {
        let mut model = UmlModel::new();
        let package = ERef::new(UmlPackage::new(ModelUuid::now_v7(), "p".to_owned()));
        let nested = new_class("Nested");
        UmlPackage::add_element(&package, nested.clone());
        model.add_element(package.into());

        assert!(!model.contains(&nested));
        assert_eq!(model.elements().len(), 1);
    }

    #[test]
    fn test_diagrams_keep_order_and_duplicates() {
        let mut model = UmlModel::new();
        let d1 = new_diagram("d1");
        let d2 = new_diagram("d2");
        model.add_diagram(d1.clone());
        model.add_diagram(d2.clone());
        assert_eq!(model.diagrams(), &[d1.clone(), d2.clone()]);

        let mut model = UmlModel::new();
        model.add_diagram(d1.clone());
        model.add_diagram(d1.clone());
        assert_eq!(model.diagrams(), &[d1.clone(), d1]);
    }

    #[test]
    fn test_display() {
        assert_eq!(UmlModel::new().to_string(), "UML model");
    }
}
