use std::collections::{BTreeMap, BTreeSet};

use crate::{ConfigError, Method};

static NO_PRIVILEGES: BTreeSet<String> = BTreeSet::new();

/// Maps every [`Method`] to the privileges a caller's credentials must grant.
///
/// A table is always complete: construction fails if any method is left out,
/// so a typo in configuration can never silently mean "no privileges
/// required".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegeTable(BTreeMap<Method, BTreeSet<String>>);

impl PrivilegeTable {
    /// Build a table from explicit entries, checking that every method is
    /// covered.
    pub fn from_entries<I, P>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Method, P)>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let table: BTreeMap<Method, BTreeSet<String>> = entries
            .into_iter()
            .map(|(method, privileges)| (method, privileges.into_iter().map(Into::into).collect()))
            .collect();

        let missing: Vec<Method> = Method::ALL
            .into_iter()
            .filter(|method| !table.contains_key(method))
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingPrivileges(missing));
        }

        Ok(Self(table))
    }

    /// The privileges required to invoke `method`.
    pub fn required(&self, method: Method) -> &BTreeSet<String> {
        self.0.get(&method).unwrap_or(&NO_PRIVILEGES)
    }
}

impl Default for PrivilegeTable {
    /// The standard GENI aggregate manager privileges.
    fn default() -> Self {
        let table = Method::ALL
            .into_iter()
            .map(|method| {
                let privileges = default_privileges(method)
                    .iter()
                    .map(|privilege| (*privilege).to_owned())
                    .collect();
                (method, privileges)
            })
            .collect();
        Self(table)
    }
}

fn default_privileges(method: Method) -> &'static [&'static str] {
    match method {
        Method::GetVersion => &[],
        Method::ListResourcesV2 | Method::ListResourcesV3 => &["listnodes"],
        Method::CreateSliverV2
        | Method::AllocateV3
        | Method::ProvisionV3
        | Method::PerformOperationalActionV3
        | Method::UpdateV3
        | Method::CancelV3 => &["createsliver"],
        Method::DeleteSliverV2 | Method::DeleteV3 => &["deletesliver"],
        Method::RenewSliverV2 | Method::RenewV3 => &["renewsliver"],
        Method::SliverStatusV2 | Method::StatusV3 | Method::DescribeV3 => &["getsliceresources"],
        Method::ShutdownV2 | Method::ShutdownV3 => &["shutdown"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_covers_every_method_by_default() {
        let table = PrivilegeTable::default();
        assert!(table.required(Method::GetVersion).is_empty());
        assert_eq!(
            table.required(Method::AllocateV3),
            &BTreeSet::from(["createsliver".to_owned()])
        );
        assert_eq!(
            table.required(Method::DeleteSliverV2),
            &BTreeSet::from(["deletesliver".to_owned()])
        );
    }

    #[test]
    fn it_rejects_incomplete_tables() {
        let result = PrivilegeTable::from_entries([(Method::GetVersion, Vec::<String>::new())]);
        let Err(ConfigError::MissingPrivileges(missing)) = result else {
            panic!("expected missing privileges");
        };
        assert_eq!(missing.len(), Method::ALL.len() - 1);
        assert!(missing.contains(&Method::CreateSliverV2));
    }

    #[test]
    fn it_accepts_complete_tables() {
        let table = PrivilegeTable::from_entries(
            Method::ALL.into_iter().map(|method| (method, ["pi"])),
        )
        .unwrap();
        assert_eq!(
            table.required(Method::ShutdownV3),
            &BTreeSet::from(["pi".to_owned()])
        );
    }
}
