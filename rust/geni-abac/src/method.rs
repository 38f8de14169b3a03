use std::{fmt::Display, str::FromStr};

use crate::ConfigError;

/// The aggregate manager API methods that can be authorized.
///
/// The textual form of each method is its variant name, e.g.
/// `CreateSliverV2`; this is what policies see in `$METHOD` and what
/// configuration files use as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    GetVersion,
    ListResourcesV2,
    CreateSliverV2,
    DeleteSliverV2,
    SliverStatusV2,
    RenewSliverV2,
    ShutdownV2,
    ListResourcesV3,
    DescribeV3,
    AllocateV3,
    ProvisionV3,
    StatusV3,
    PerformOperationalActionV3,
    RenewV3,
    DeleteV3,
    ShutdownV3,
    UpdateV3,
    CancelV3,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Method; 18] = [
        Method::GetVersion,
        Method::ListResourcesV2,
        Method::CreateSliverV2,
        Method::DeleteSliverV2,
        Method::SliverStatusV2,
        Method::RenewSliverV2,
        Method::ShutdownV2,
        Method::ListResourcesV3,
        Method::DescribeV3,
        Method::AllocateV3,
        Method::ProvisionV3,
        Method::StatusV3,
        Method::PerformOperationalActionV3,
        Method::RenewV3,
        Method::DeleteV3,
        Method::ShutdownV3,
        Method::UpdateV3,
        Method::CancelV3,
    ];

    /// The method identifier as it appears in policy and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GetVersion => "GetVersion",
            Method::ListResourcesV2 => "ListResourcesV2",
            Method::CreateSliverV2 => "CreateSliverV2",
            Method::DeleteSliverV2 => "DeleteSliverV2",
            Method::SliverStatusV2 => "SliverStatusV2",
            Method::RenewSliverV2 => "RenewSliverV2",
            Method::ShutdownV2 => "ShutdownV2",
            Method::ListResourcesV3 => "ListResourcesV3",
            Method::DescribeV3 => "DescribeV3",
            Method::AllocateV3 => "AllocateV3",
            Method::ProvisionV3 => "ProvisionV3",
            Method::StatusV3 => "StatusV3",
            Method::PerformOperationalActionV3 => "PerformOperationalActionV3",
            Method::RenewV3 => "RenewV3",
            Method::DeleteV3 => "DeleteV3",
            Method::ShutdownV3 => "ShutdownV3",
            Method::UpdateV3 => "UpdateV3",
            Method::CancelV3 => "CancelV3",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownMethod(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_every_method_name() {
        for method in Method::ALL {
            assert_eq!(method.as_str().parse::<Method>().ok(), Some(method));
        }
    }

    #[test]
    fn it_rejects_unknown_and_miscased_names() {
        assert!("CreateSliver".parse::<Method>().is_err());
        assert!("createsliverv2".parse::<Method>().is_err());
    }
}
