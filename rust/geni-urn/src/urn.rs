use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::UrnError;

/// Scheme prefix shared by every GENI identifier.
pub const URN_PREFIX: &str = "urn:publicid:IDN";

/// Object type of URNs naming a project.
pub const PROJECT_TYPE: &str = "project";

/// Object type of URNs naming an authority.
pub const AUTHORITY_TYPE: &str = "authority";

/// Name given to the certificate authority of an authority.
pub const AUTHORITY_NAME: &str = "ca";

const CANONICAL_SHAPE: &str = "urn:publicid:IDN+<authority>+<type>+<name>";
const SLICE_SHAPE: &str = "a second '+' segment of the form <authority>:<project>";
const USER_SHAPE: &str = "a second '+' segment of the form <authority>:<sub-authority>";

/// A [`Urn`] is a GENI publicid identifier, made of an authority, an object
/// type and a name, serialized as `urn:publicid:IDN+authority+type+name`.
///
/// The prefix is matched case-insensitively when parsing but kept as
/// written, so a parsed [`Urn`] displays exactly as its input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Urn {
    prefix: String,
    authority: String,
    kind: String,
    name: String,
}

impl Urn {
    /// Assemble a URN from its three components.
    pub fn new(
        authority: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            prefix: URN_PREFIX.to_owned(),
            authority: authority.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// The authority segment, e.g. `example.org:myproj`.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// The object type segment, e.g. `slice` or `user`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The object name segment.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Parse a canonical URN string.
pub fn parse_urn(input: &str) -> Result<Urn, UrnError> {
    input.parse()
}

/// Derive the project URN that owns a slice.
///
/// The slice's authority segment `A:P` yields `urn:publicid:IDN+A+project+P`.
pub fn project_urn_from_slice(slice_urn: &str) -> Result<Urn, UrnError> {
    let (authority, project) = split_authority(slice_urn, SLICE_SHAPE)?;
    Ok(Urn::new(authority, PROJECT_TYPE, project))
}

/// Derive the authority URN responsible for a user.
///
/// The user's authority segment `A:U` yields `urn:publicid:IDN+A+authority+ca`.
pub fn authority_urn_from_user(user_urn: &str) -> Result<Urn, UrnError> {
    let (authority, _) = split_authority(user_urn, USER_SHAPE)?;
    Ok(Urn::new(authority, AUTHORITY_TYPE, AUTHORITY_NAME))
}

/// Splits the second `+` segment on `:`, returning the first two tokens.
fn split_authority<'a>(
    input: &'a str,
    expected: &'static str,
) -> Result<(&'a str, &'a str), UrnError> {
    let segment = input
        .split('+')
        .nth(1)
        .ok_or_else(|| UrnError::malformed(input, expected))?;

    let mut tokens = segment.split(':');
    match (tokens.next(), tokens.next()) {
        (Some(authority), Some(sub)) if !authority.is_empty() && !sub.is_empty() => {
            Ok((authority, sub))
        }
        _ => Err(UrnError::malformed(input, expected)),
    }
}

impl FromStr for Urn {
    type Err = UrnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('+').collect();

        let [prefix, authority, kind, name] = segments.as_slice() else {
            return Err(UrnError::malformed(s, CANONICAL_SHAPE));
        };

        if !prefix.eq_ignore_ascii_case(URN_PREFIX)
            || authority.is_empty()
            || kind.is_empty()
            || name.is_empty()
        {
            return Err(UrnError::malformed(s, CANONICAL_SHAPE));
        }

        Ok(Urn {
            prefix: (*prefix).to_owned(),
            ..Urn::new(*authority, *kind, *name)
        })
    }
}

impl TryFrom<String> for Urn {
    type Error = UrnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Urn> for String {
    fn from(value: Urn) -> Self {
        value.to_string()
    }
}

impl Display for Urn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}+{}+{}+{}",
            self.prefix, self.authority, self.kind, self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_derives_a_project_from_a_slice() -> Result<()> {
        let project = project_urn_from_slice("urn:publicid:IDN+example.org:myproj+slice+myslice")?;
        assert_eq!(
            project.to_string(),
            "urn:publicid:IDN+example.org+project+myproj"
        );
        assert_eq!(project.kind(), "project");
        Ok(())
    }

    #[test]
    fn it_derives_an_authority_from_a_user() -> Result<()> {
        let authority = authority_urn_from_user("urn:publicid:IDN+example.org:bob+user+bob")?;
        assert_eq!(
            authority.to_string(),
            "urn:publicid:IDN+example.org+authority+ca"
        );
        Ok(())
    }

    #[test]
    fn it_takes_only_the_second_colon_token_as_project() -> Result<()> {
        let project = project_urn_from_slice("urn:publicid:IDN+ch.geni.net:proj:extra+slice+s")?;
        assert_eq!(project.authority(), "ch.geni.net");
        assert_eq!(project.name(), "proj");
        Ok(())
    }

    #[test]
    fn it_rejects_inputs_without_a_plus() {
        let error = project_urn_from_slice("urn:publicid:IDN").unwrap_err();
        assert!(matches!(error, UrnError::Malformed { ref input, .. } if input == "urn:publicid:IDN"));

        assert!(authority_urn_from_user("bob").is_err());
    }

    #[test]
    fn it_rejects_authorities_without_a_colon() {
        let error = authority_urn_from_user("urn:publicid:IDN+ch.geni.net+user+bob").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("urn:publicid:IDN+ch.geni.net+user+bob"));
        assert!(message.contains("<authority>:<sub-authority>"));

        assert!(project_urn_from_slice("urn:publicid:IDN+ch.geni.net+slice+s").is_err());
    }

    #[test]
    fn it_rejects_empty_authority_tokens() {
        assert!(project_urn_from_slice("urn:publicid:IDN+:proj+slice+s").is_err());
        assert!(project_urn_from_slice("urn:publicid:IDN+example.org:+slice+s").is_err());
    }

    #[test]
    fn it_derives_deterministically() -> Result<()> {
        let slice = "urn:publicid:IDN+example.org:myproj+slice+myslice";
        assert_eq!(project_urn_from_slice(slice)?, project_urn_from_slice(slice)?);
        Ok(())
    }

    #[test]
    fn it_parses_and_displays_canonical_urns() -> Result<()> {
        let urn: Urn = "urn:publicid:IDN+example.org:bob+user+bob".parse()?;
        assert_eq!(urn.authority(), "example.org:bob");
        assert_eq!(urn.kind(), "user");
        assert_eq!(urn.name(), "bob");
        assert_eq!(urn.to_string(), "urn:publicid:IDN+example.org:bob+user+bob");
        Ok(())
    }

    #[test]
    fn it_accepts_an_uppercase_prefix_and_keeps_it() -> Result<()> {
        let urn = parse_urn("URN:PUBLICID:IDN+example.org+authority+am")?;
        assert_eq!(urn.authority(), "example.org");
        assert_eq!(urn.to_string(), "URN:PUBLICID:IDN+example.org+authority+am");
        assert_ne!(urn, Urn::new("example.org", "authority", "am"));
        Ok(())
    }

    #[test]
    fn it_rejects_non_canonical_urns() {
        for input in [
            "",
            "urn:publicid:IDN+a+b",
            "urn:publicid:IDN+a+b+c+d",
            "urn:other:IDN+a+b+c",
            "urn:publicid:IDN++b+c",
            "urn:publicid:IDN+a+b+",
        ] {
            assert!(parse_urn(input).is_err(), "expected {input:?} to be rejected");
        }
    }

    #[test]
    fn it_serializes_as_a_string() -> Result<()> {
        let urn = Urn::new("example.org", "authority", "am");
        let json = serde_json::to_string(&urn)?;
        assert_eq!(json, "\"urn:publicid:IDN+example.org+authority+am\"");
        assert_eq!(serde_json::from_str::<Urn>(&json)?, urn);
        assert!(serde_json::from_str::<Urn>("\"not-a-urn\"").is_err());
        Ok(())
    }
}
