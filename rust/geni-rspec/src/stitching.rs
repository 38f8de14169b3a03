use std::fmt::Display;

use geni_urn::Urn;

use crate::{Element, RspecError, parse_document};

const RSPEC: &str = "rspec";
const STITCHING: &str = "stitching";
const LINK: &str = "link";
const COMPONENT_MANAGER: &str = "component_manager";
const PATH: &str = "path";

/// The ordered stitch points a request asks an aggregate to connect.
///
/// Order follows the document and duplicates are kept, since policy may
/// care about multiplicity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StitchPoints(Vec<String>);

impl StitchPoints {
    /// The link ids, in encounter order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of stitch points (duplicates included).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no stitch point was requested.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for StitchPoints {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

/// Renders as `[L1, L2]` (or `[]`). Policies match against this exact text.
impl Display for StitchPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Compute the stitch points a request RSpec routes through `aggregate`.
///
/// Returns `Ok(None)` when the document carries no `<stitching>` element,
/// i.e. no cross-aggregate topology was requested. A document that is not
/// well-formed, or whose root is not `<rspec>`, is an error.
///
/// The selection works as follows:
///
/// 1. Direct `<link>` children of the root that list a `<component_manager>`
///    whose `name` equals the aggregate URN exactly are "our" links.
/// 2. Every `<path>` inside `<stitching>` whose `id` is the `client_id` of one
///    of our links is selected.
/// 3. The `id` of every `<link>` inside the selected paths is collected.
pub fn requested_stitch_points(
    document: &str,
    aggregate: &Urn,
) -> Result<Option<StitchPoints>, RspecError> {
    let root = parse_document(document)?;
    if root.name() != RSPEC {
        return Err(RspecError::UnexpectedRoot(root.name().to_owned()));
    }

    let Some(stitching) = root.descendants_named(STITCHING).into_iter().next() else {
        return Ok(None);
    };

    let aggregate = aggregate.to_string();
    let my_link_ids: Vec<&str> = root
        .children_named(LINK)
        .filter(|link| is_managed_by(link, &aggregate))
        .filter_map(|link| link.attribute("client_id"))
        .collect();

    let points = stitching
        .descendants_named(PATH)
        .into_iter()
        .filter(|path| {
            path.attribute("id")
                .is_some_and(|id| my_link_ids.contains(&id))
        })
        .flat_map(|path| path.descendants_named(LINK))
        .filter_map(|link| link.attribute("id"))
        .map(str::to_owned)
        .collect::<Vec<_>>();

    Ok(Some(StitchPoints(points)))
}

fn is_managed_by(link: &Element, aggregate: &str) -> bool {
    link.descendants_named(COMPONENT_MANAGER)
        .iter()
        .any(|manager| manager.attribute("name") == Some(aggregate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_displays_as_a_bracketed_list() {
        assert_eq!(StitchPoints::default().to_string(), "[]");
        assert_eq!(
            StitchPoints::from(vec!["L1".to_owned(), "L2".to_owned(), "L1".to_owned()]).to_string(),
            "[L1, L2, L1]"
        );
    }
}
