//! Reassemble tags from attributes parsed by [`crate::HtmlParser`].

use crate::attributes::{MultiValuedAttributes, SingleValuedAttributes};

/// Rebuilds an HTML opening tag from parsed attributes.
///
/// Single-valued attributes come first, then multi-valued ones, each in map
/// order. Attributes with an empty value are left out, as are attributes
/// missing from `restrict_to` when it is given. An empty element ends with
/// ` />`.
pub fn rebuild_tag(
    tag_name: &str,
    single_valued: &SingleValuedAttributes,
    multi_valued: &MultiValuedAttributes,
    restrict_to: Option<&[&str]>,
    empty_element: bool,
) -> String {
    let allowed = |name: &str| restrict_to.map_or(true, |names| names.iter().any(|n| *n == name));

    let mut tag = String::from("<");
    tag.push_str(&tag_name.to_lowercase());

    for (name, value) in single_valued {
        if allowed(name.as_str()) && !value.is_empty() {
            push_attribute(&mut tag, name, value);
        }
    }

    for (name, values) in multi_valued {
        if allowed(name.as_str()) && !values.is_empty() {
            push_attribute(&mut tag, name, &values.join(" "));
        }
    }

    if empty_element {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}

/// Rebuilds an HTML element: the opening tag, `inner_html` exactly as given,
/// and the closing tag.
pub fn rebuild_element(
    tag_name: &str,
    single_valued: &SingleValuedAttributes,
    multi_valued: &MultiValuedAttributes,
    inner_html: &str,
) -> String {
    let mut element = rebuild_tag(tag_name, single_valued, multi_valued, None, false);
    element.push_str(inner_html);
    element.push_str("</");
    element.push_str(&tag_name.to_lowercase());
    element.push('>');
    element
}

/// Append ` name="value"`, switching quotes so the value cannot end the attribute early
fn push_attribute(tag: &mut String, name: &str, value: &str) {
    tag.push(' ');
    tag.push_str(name);
    if !value.contains('"') {
        tag.push_str("=\"");
        tag.push_str(value);
        tag.push('"');
    } else if !value.contains('\'') {
        tag.push_str("='");
        tag.push_str(value);
        tag.push('\'');
    } else {
        tag.push_str("=\"");
        tag.push_str(&value.replace('"', "&quot;"));
        tag.push('"');
    }
}
