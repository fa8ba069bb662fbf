use kuchiki::{NodeData, NodeRef};

use crate::errors::{TableViewError, TableViewResult};

/// Check whether `node` is an element with the given local name.
pub(crate) fn is_element(node: &NodeRef, tag: &str) -> bool {
    node.as_element()
        .is_some_and(|elem| (*elem.name.local).eq_ignore_ascii_case(tag))
}

/// Direct element children of `node` with the given local name, in order.
pub(crate) fn element_children(node: &NodeRef, tag: &str) -> Vec<NodeRef> {
    node.children().filter(|child| is_element(child, tag)).collect()
}

/// Every text node below `node`, in document order.
pub(crate) fn text_descendants(node: &NodeRef) -> Vec<NodeRef> {
    node.descendants()
        .filter(|n| n.as_text().is_some())
        .collect()
}

/// Copy `node` and its whole subtree into fresh, detached nodes.
///
/// Elements keep their name and attributes; text, comments and processing
/// instructions keep their content. Serializing the copy produces the same
/// markup as serializing the original.
pub(crate) fn deep_clone(node: &NodeRef) -> NodeRef {
    let copy = match node.data() {
        NodeData::Element(elem) => {
            NodeRef::new_element(elem.name.clone(), elem.attributes.borrow().map.clone())
        }
        NodeData::Text(text) => NodeRef::new_text(text.borrow().clone()),
        NodeData::Comment(text) => NodeRef::new_comment(text.borrow().clone()),
        NodeData::ProcessingInstruction(pi) => {
            let pi = pi.borrow();
            NodeRef::new_processing_instruction(pi.0.clone(), pi.1.clone())
        }
        NodeData::Doctype(doctype) => NodeRef::new_doctype(
            doctype.name.clone(),
            doctype.public_id.clone(),
            doctype.system_id.clone(),
        ),
        NodeData::Document(_) => NodeRef::new_document(),
        NodeData::DocumentFragment => NodeRef::new(NodeData::DocumentFragment),
    };

    for child in node.children() {
        copy.append(deep_clone(&child));
    }
    copy
}

/// New detached element with the same name and attributes as `template`,
/// without children. Returns `None` when `template` is not an element.
pub(crate) fn shallow_clone_element(template: &NodeRef) -> Option<NodeRef> {
    template.as_element().map(|elem| {
        NodeRef::new_element(elem.name.clone(), elem.attributes.borrow().map.clone())
    })
}

/// Serialize `node` itself, including its own tag.
pub(crate) fn outer_html(node: &NodeRef) -> TableViewResult<String> {
    let mut output = Vec::new();
    node.serialize(&mut output)
        .map_err(|e| TableViewError::Serialization(e.to_string()))?;
    String::from_utf8(output).map_err(|e| TableViewError::Serialization(e.to_string()))
}

/// Serialize the children of `node`.
pub(crate) fn inner_html(node: &NodeRef) -> TableViewResult<String> {
    let mut html = String::new();
    for child in node.children() {
        html.push_str(&outer_html(&child)?);
    }
    Ok(html)
}

/// Detach every child of `node`.
pub(crate) fn clear_children(node: &NodeRef) {
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
        child.detach();
    }
}

/// Move `child` to the end of `parent`'s children.
pub(crate) fn move_to_end(parent: &NodeRef, child: &NodeRef) {
    child.detach();
    parent.append(child.clone());
}

/// Whether `ancestor` is `node` or one of its ancestors.
pub(crate) fn contains(ancestor: &NodeRef, node: &NodeRef) -> bool {
    node.inclusive_ancestors().any(|n| n == *ancestor)
}

/// Split a text node at a byte offset, DOM `splitText` style.
///
/// The node keeps `[..offset]`; a new text node holding `[offset..]` is
/// inserted right after it and returned. Returns `Ok(None)` when `offset`
/// is the current end of the text, since there is nothing to split off.
pub(crate) fn split_text(node: &NodeRef, offset: usize) -> Result<Option<NodeRef>, SplitError> {
    let text = node.as_text().ok_or(SplitError::NotText)?;
    let tail = {
        let mut contents = text.borrow_mut();
        if offset > contents.len() {
            return Err(SplitError::OutOfBounds {
                offset,
                len: contents.len(),
            });
        }
        if !contents.is_char_boundary(offset) {
            return Err(SplitError::NotCharBoundary(offset));
        }
        if offset == contents.len() {
            return Ok(None);
        }
        contents.split_off(offset)
    };
    let tail = NodeRef::new_text(tail);
    node.insert_after(tail.clone());
    Ok(Some(tail))
}

/// Why a text split was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SplitError {
    NotText,
    OutOfBounds { offset: usize, len: usize },
    NotCharBoundary(usize),
}

/// Set or remove a valueless attribute such as `hidden`.
pub(crate) fn set_flag_attribute(node: &NodeRef, name: &str, on: bool) {
    if let Some(elem) = node.as_element() {
        let mut attrs = elem.attributes.borrow_mut();
        if on {
            attrs.insert(name, String::new());
        } else {
            attrs.remove(name);
        }
    }
}

pub(crate) fn has_class(node: &NodeRef, class: &str) -> bool {
    node.as_element().is_some_and(|elem| {
        elem.attributes
            .borrow()
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    })
}

/// Add or remove one class, leaving the others in place.
pub(crate) fn set_class(node: &NodeRef, class: &str, on: bool) {
    let Some(elem) = node.as_element() else {
        return;
    };
    let mut attrs = elem.attributes.borrow_mut();
    let mut classes: Vec<String> = attrs
        .get("class")
        .map(|c| c.split_whitespace().map(String::from).collect())
        .unwrap_or_default();

    let present = classes.iter().any(|c| c == class);
    if on && !present {
        classes.push(class.to_string());
    } else if !on && present {
        classes.retain(|c| c != class);
    } else {
        return;
    }

    if classes.is_empty() {
        attrs.remove("class");
    } else {
        attrs.insert("class", classes.join(" "));
    }
}

/// Closest ancestor (excluding `node`) carrying `class`.
pub(crate) fn closest_with_class(node: &NodeRef, class: &str) -> Option<NodeRef> {
    node.ancestors().find(|n| has_class(n, class))
}
