/// Errors that make a resource description unusable.
///
/// These indicate a malformed request body, as opposed to a request that
/// simply carries no stitching information.
#[derive(Debug, thiserror::Error)]
pub enum RspecError {
    /// The document is not well-formed XML.
    #[error("RSpec is not well-formed XML at byte {position}: {source}")]
    Xml {
        /// Byte offset at which the reader gave up.
        position: u64,
        /// The underlying reader error.
        #[source]
        source: quick_xml::Error,
    },

    /// An attribute could not be read or unescaped.
    #[error("RSpec element <{element}> has a malformed attribute: {message}")]
    Attribute {
        /// Local name of the element carrying the attribute.
        element: String,
        /// Description of the failure.
        message: String,
    },

    /// The document contains no element at all.
    #[error("RSpec document has no root element")]
    MissingRoot,

    /// The root element is something other than `rspec`.
    #[error("RSpec root element must be <rspec>, found <{0}>")]
    UnexpectedRoot(String),

    /// A second top-level element follows the root.
    #[error("RSpec document has more than one root element (second is <{0}>)")]
    MultipleRoots(String),

    /// An end tag appeared with no element open.
    #[error("RSpec document closes </{0}> with no element open")]
    UnexpectedClose(String),

    /// The document ended while an element was still open.
    #[error("RSpec document ended inside <{0}>")]
    Unclosed(String),

    /// Character data appears outside the root element.
    #[error("RSpec document has text outside the root element at byte {position}")]
    StrayText {
        /// Byte offset just past the offending text.
        position: u64,
    },

    /// Elements are nested deeper than the parser accepts.
    #[error("RSpec document nests elements deeper than {limit} levels")]
    TooDeep {
        /// The maximum accepted depth.
        limit: usize,
    },
}
