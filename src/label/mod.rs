//! PDS4 label parsing and namespace-qualified structural queries.
//!
//! [`LabelDocument`] borrows the label text and wraps a `roxmltree`
//! document. Queries hand out [`Element`] handles, which are cheap to copy
//! and expose typed accessors for text, attributes and children.
//!
//! # Example
//!
//! ```
//! use pds4view::label::{LabelDocument, NamespaceMap};
//!
//! let xml = r#"<Product_Observational xmlns="http://pds.nasa.gov/pds4/pds/v1">
//!   <File_Area_Observational>
//!     <File><file_name> image.dat </file_name></File>
//!   </File_Area_Observational>
//! </Product_Observational>"#;
//!
//! let label = LabelDocument::parse(xml).unwrap();
//! let ns = NamespaceMap::pds4();
//! let name = label
//!     .find_one("pds4:File_Area_Observational/pds4:File/pds4:file_name", &ns)
//!     .unwrap()
//!     .and_then(|element| element.text());
//! assert_eq!(name.as_deref(), Some("image.dat"));
//! ```

mod query;

pub use query::{NamespaceMap, DISP_NAMESPACE, PDS4_NAMESPACE};

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use roxmltree::Node;

use crate::error::Pds4Error;

const MEMORY_SOURCE: &str = "<memory>";

/// A parsed, immutable label.
pub struct LabelDocument<'input> {
    document: roxmltree::Document<'input>,
}

impl<'input> LabelDocument<'input> {
    /// Parse a label from a UTF-8 string.
    pub fn parse(xml: &'input str) -> Result<Self, Pds4Error> {
        Self::parse_from(xml, Path::new(MEMORY_SOURCE))
    }

    /// Parse a label from bytes. The input must be valid UTF-8.
    pub fn from_slice(bytes: &'input [u8]) -> Result<Self, Pds4Error> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let xml = std::str::from_utf8(bytes).map_err(|source| Pds4Error::LabelParse {
            path: PathBuf::from(MEMORY_SOURCE),
            message: format!("input is not valid UTF-8: {source}"),
        })?;
        Self::parse(xml)
    }

    /// Parse a label, attributing parse failures to `source`.
    pub fn parse_from(xml: &'input str, source: &Path) -> Result<Self, Pds4Error> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let document =
            roxmltree::Document::parse(xml).map_err(|err| Pds4Error::LabelParse {
                path: source.to_path_buf(),
                message: err.to_string(),
            })?;
        Ok(Self { document })
    }

    /// The document's root element (`Product_Observational` for image products).
    pub fn root(&self) -> Element<'_, 'input> {
        Element {
            node: self.document.root_element(),
        }
    }

    /// All elements matching `path`, relative to the root element.
    pub fn find_all(
        &self,
        path: &str,
        ns: &NamespaceMap,
    ) -> Result<Vec<Element<'_, 'input>>, Pds4Error> {
        self.root().find_all(path, ns)
    }

    /// The first element matching `path` in document order, relative to the root element.
    pub fn find_one(
        &self,
        path: &str,
        ns: &NamespaceMap,
    ) -> Result<Option<Element<'_, 'input>>, Pds4Error> {
        self.root().find_one(path, ns)
    }
}

impl fmt::Debug for LabelDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelDocument")
            .field("root", &self.root().name())
            .finish()
    }
}

/// Read a label file into memory.
///
/// The returned text is what [`LabelDocument::parse_from`] borrows from.
pub fn read_label_text(path: &Path) -> Result<String, Pds4Error> {
    let bytes = fs::read(path).map_err(|source| Pds4Error::LabelRead {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| Pds4Error::LabelParse {
        path: path.to_path_buf(),
        message: format!("label is not valid UTF-8: {source}"),
    })
}

/// A handle to one element of a [`LabelDocument`].
#[derive(Clone, Copy)]
pub struct Element<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Element<'a, 'input> {
    /// Local tag name, without prefix.
    pub fn name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Namespace URI, if the element is namespaced.
    pub fn namespace(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    /// Text content with surrounding whitespace removed; `None` when empty.
    ///
    /// All direct text children are joined, so comments and processing
    /// instructions inside the element are skipped. The common single-node
    /// case borrows from the label.
    pub fn text(&self) -> Option<Cow<'a, str>> {
        let mut pieces = self
            .node
            .children()
            .filter(Node::is_text)
            .filter_map(|node| node.text());
        let first = pieces.next()?;

        let text = match pieces.next() {
            None => Cow::Borrowed(first.trim()),
            Some(second) => {
                let mut joined = String::from(first);
                joined.push_str(second);
                joined.extend(pieces);
                Cow::Owned(joined.trim().to_string())
            }
        };
        (!text.is_empty()).then_some(text)
    }

    /// Value of an un-namespaced attribute.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = Element<'a, 'input>> {
        self.node
            .children()
            .filter(Node::is_element)
            .map(|node| Element { node })
    }

    /// All descendants matching `path`, relative to this element.
    pub fn find_all(
        &self,
        path: &str,
        ns: &NamespaceMap,
    ) -> Result<Vec<Element<'a, 'input>>, Pds4Error> {
        let steps = query::compile(path, ns)?;
        let mut current = vec![*self];
        for step in &steps {
            current = current
                .iter()
                .flat_map(|element| element.children())
                .filter(|child| step.matches(child.namespace(), child.name()))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        Ok(current)
    }

    /// The first descendant matching `path`, in document order.
    pub fn find_one(
        &self,
        path: &str,
        ns: &NamespaceMap,
    ) -> Result<Option<Element<'a, 'input>>, Pds4Error> {
        Ok(self.find_all(path, ns)?.into_iter().next())
    }
}

impl fmt::Debug for Element<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name())
            .field("namespace", &self.namespace())
            .field("text", &self.text())
            .finish()
    }
}

pub(crate) fn required_child<'a, 'input>(
    element: Element<'a, 'input>,
    path: &str,
    ns: &NamespaceMap,
    context: &str,
) -> Result<Element<'a, 'input>, Pds4Error> {
    element
        .find_one(path, ns)?
        .ok_or_else(|| Pds4Error::MissingElement {
            element: display_path(path),
            context: context.to_string(),
        })
}

pub(crate) fn required_text<'a>(
    element: Element<'a, '_>,
    path: &str,
    ns: &NamespaceMap,
    context: &str,
) -> Result<Cow<'a, str>, Pds4Error> {
    required_child(element, path, ns, context)?
        .text()
        .ok_or_else(|| Pds4Error::MissingElement {
            element: display_path(path),
            context: context.to_string(),
        })
}

pub(crate) fn parse_required<T: FromStr>(
    element: Element<'_, '_>,
    path: &str,
    ns: &NamespaceMap,
    context: &str,
    expected: &'static str,
) -> Result<T, Pds4Error> {
    let raw = required_text(element, path, ns, context)?;
    raw.parse::<T>().map_err(|_| Pds4Error::InvalidValue {
        element: display_path(path),
        value: raw.to_string(),
        context: context.to_string(),
        expected,
    })
}

/// Strips prefixes so error messages read like the label: `Axis_Array/elements`.
fn display_path(path: &str) -> String {
    path.trim_start_matches("./")
        .split('/')
        .map(|step| step.split_once(':').map_or(step, |(_, local)| local))
        .collect::<Vec<_>>()
        .join("/")
}
