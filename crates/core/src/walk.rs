//! Pre-order traversal over the parsed element tree.
//!
//! [`walk`] visits a node before its children and short-circuits on the
//! first callback failure: a failing container callback skips that
//! container's children entirely, and a failing child subtree aborts the
//! remaining siblings.

use crate::ast::{
    Ast, Categorization, Category, CategoryElement, Control, CustomElement, Group,
    HorizontalLayout, LabelElement, UiSchemaElement, VerticalLayout,
};

/// Per-variant callbacks invoked by [`walk`].
///
/// Every method defaults to a no-op success, so implementations override
/// only the variants they care about.
pub trait Visitor {
    type Error;

    fn visit_control(&mut self, _element: &Control) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_vertical_layout(
        &mut self,
        _element: &VerticalLayout,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_horizontal_layout(
        &mut self,
        _element: &HorizontalLayout,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_group(&mut self, _element: &Group) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_categorization(&mut self, _element: &Categorization) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_category(&mut self, _element: &Category) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_label(&mut self, _element: &LabelElement) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_custom(&mut self, _element: &CustomElement) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk an element tree depth-first, parents before children, stopping at
/// the first callback error.
pub fn walk<V: Visitor>(element: &UiSchemaElement, visitor: &mut V) -> Result<(), V::Error> {
    match element {
        UiSchemaElement::Control(e) => visitor.visit_control(e),
        UiSchemaElement::Label(e) => visitor.visit_label(e),
        UiSchemaElement::VerticalLayout(e) => {
            visitor.visit_vertical_layout(e)?;
            walk_children(&e.elements, visitor)
        }
        UiSchemaElement::HorizontalLayout(e) => {
            visitor.visit_horizontal_layout(e)?;
            walk_children(&e.elements, visitor)
        }
        UiSchemaElement::Group(e) => {
            visitor.visit_group(e)?;
            walk_children(&e.elements, visitor)
        }
        UiSchemaElement::Category(e) => walk_category(e, visitor),
        UiSchemaElement::Categorization(e) => walk_categorization(e, visitor),
        UiSchemaElement::Custom(e) => {
            visitor.visit_custom(e)?;
            walk_children(&e.elements, visitor)
        }
    }
}

/// Walk an optional root; an absent root is a successful no-op.
pub fn walk_opt<V: Visitor>(
    element: Option<&UiSchemaElement>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    match element {
        Some(e) => walk(e, visitor),
        None => Ok(()),
    }
}

impl Ast {
    /// Walk the layout tree of this AST.
    pub fn walk<V: Visitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
        walk(&self.uischema, visitor)
    }
}

fn walk_children<V: Visitor>(
    elements: &[UiSchemaElement],
    visitor: &mut V,
) -> Result<(), V::Error> {
    for child in elements {
        walk(child, visitor)?;
    }
    Ok(())
}

fn walk_category<V: Visitor>(element: &Category, visitor: &mut V) -> Result<(), V::Error> {
    visitor.visit_category(element)?;
    walk_children(&element.elements, visitor)
}

fn walk_categorization<V: Visitor>(
    element: &Categorization,
    visitor: &mut V,
) -> Result<(), V::Error> {
    visitor.visit_categorization(element)?;
    for child in &element.elements {
        match child {
            CategoryElement::Category(c) => walk_category(c, visitor)?,
            CategoryElement::Categorization(c) => walk_categorization(c, visitor)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_element;
    use serde_json::json;

    /// Counts visits per variant; fails when asked to.
    #[derive(Default)]
    struct Counter {
        controls: usize,
        layouts: usize,
        groups: usize,
        categorizations: usize,
        categories: usize,
        labels: usize,
        customs: usize,
        fail_on_group: bool,
    }

    impl Visitor for Counter {
        type Error = String;

        fn visit_control(&mut self, _element: &Control) -> Result<(), String> {
            self.controls += 1;
            Ok(())
        }

        fn visit_vertical_layout(
            &mut self,
            _element: &VerticalLayout,
        ) -> Result<(), String> {
            self.layouts += 1;
            Ok(())
        }

        fn visit_horizontal_layout(
            &mut self,
            _element: &HorizontalLayout,
        ) -> Result<(), String> {
            self.layouts += 1;
            Ok(())
        }

        fn visit_group(&mut self, element: &Group) -> Result<(), String> {
            if self.fail_on_group {
                return Err(format!("stop at group '{}'", element.label));
            }
            self.groups += 1;
            Ok(())
        }

        fn visit_categorization(&mut self, _element: &Categorization) -> Result<(), String> {
            self.categorizations += 1;
            Ok(())
        }

        fn visit_category(&mut self, _element: &Category) -> Result<(), String> {
            self.categories += 1;
            Ok(())
        }

        fn visit_label(&mut self, _element: &LabelElement) -> Result<(), String> {
            self.labels += 1;
            Ok(())
        }

        fn visit_custom(&mut self, _element: &CustomElement) -> Result<(), String> {
            self.customs += 1;
            Ok(())
        }
    }

    fn sample_tree() -> UiSchemaElement {
        parse_element(&json!({
            "type": "VerticalLayout",
            "elements": [
                {"type": "Control", "scope": "#/properties/name"},
                {"type": "Group", "label": "Address", "elements": [
                    {"type": "Control", "scope": "#/properties/street"},
                    {"type": "Label", "text": "City"}
                ]},
                {"type": "Notice", "elements": [
                    {"type": "Control", "scope": "#/properties/extra"}
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn walk_visits_every_node_pre_order() {
        let tree = sample_tree();
        let mut counter = Counter::default();
        walk(&tree, &mut counter).unwrap();
        assert_eq!(counter.layouts, 1);
        assert_eq!(counter.controls, 3);
        assert_eq!(counter.groups, 1);
        assert_eq!(counter.labels, 1);
        assert_eq!(counter.customs, 1);
    }

    #[test]
    fn failing_container_callback_skips_its_children() {
        let tree = sample_tree();
        let mut counter = Counter {
            fail_on_group: true,
            ..Counter::default()
        };
        let err = walk(&tree, &mut counter).unwrap_err();
        assert_eq!(err, "stop at group 'Address'");
        // The control before the group was visited; the group's children
        // and the siblings after it were not.
        assert_eq!(counter.controls, 1);
        assert_eq!(counter.labels, 0);
        assert_eq!(counter.customs, 0);
    }

    #[test]
    fn walk_dispatches_categorization_children() {
        let tree = parse_element(&json!({
            "type": "Categorization",
            "elements": [
                {"type": "Category", "label": "One", "elements": [
                    {"type": "Control", "scope": "#/properties/a"}
                ]},
                {"type": "Categorization", "elements": [
                    {"type": "Category", "label": "Two", "elements": []}
                ]}
            ]
        }))
        .unwrap();
        let mut counter = Counter::default();
        walk(&tree, &mut counter).unwrap();
        assert_eq!(counter.categorizations, 2);
        assert_eq!(counter.categories, 2);
        assert_eq!(counter.controls, 1);
    }

    #[test]
    fn repeated_walks_yield_identical_counts() {
        let tree = sample_tree();
        let mut first = Counter::default();
        let mut second = Counter::default();
        walk(&tree, &mut first).unwrap();
        walk(&tree, &mut second).unwrap();
        assert_eq!(first.controls, second.controls);
        assert_eq!(first.groups, second.groups);
        assert_eq!(first.customs, second.customs);
        assert_eq!(first.labels, second.labels);
    }

    #[test]
    fn absent_root_is_a_no_op() {
        let mut counter = Counter::default();
        walk_opt(None, &mut counter).unwrap();
        assert_eq!(counter.controls, 0);
    }
}
