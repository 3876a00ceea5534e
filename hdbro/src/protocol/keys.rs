//! Option keys of each option part.
//!
//! Every key set is closed, unrecognized keys are kept as `Other` so a block
//! can be decoded and written back unchanged.
use std::fmt;

use super::{OptionKey, PartKind};

macro_rules! option_key {
    (
        $(#[$doc:meta])*
        $part:ident => enum $name:ident {
            $($(#[$vdoc:meta])* $variant:ident = $code:literal,)*
        }
    ) => {
        $(#[$doc])*
        ///
        /// Keys compare by wire code, `Other` holding a known code equals
        /// the named variant.
        #[derive(Clone, Copy)]
        pub enum $name {
            $($(#[$vdoc])* $variant,)*
            /// Key not known by this crate.
            Other(i8),
        }

        impl From<i8> for $name {
            fn from(code: i8) -> Self {
                match code {
                    $($code => Self::$variant,)*
                    other => Self::Other(other),
                }
            }
        }

        impl From<$name> for i8 {
            fn from(key: $name) -> i8 {
                match key {
                    $($name::$variant => $code,)*
                    $name::Other(code) => code,
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                i8::from(*self) == i8::from(*other)
            }
        }

        impl Eq for $name { }

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                i8::from(*self).hash(state);
            }
        }

        impl OptionKey for $name {
            const PART: PartKind = PartKind::$part;
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str(stringify!($variant)),)*
                    Self::Other(code) => write!(f, "Other({code})"),
                }
            }
        }
    };
}

option_key! {
    /// Connection parameters negotiated on connect.
    ConnectOptions => enum ConnectOption {
        ConnectionId = 1,
        CompleteArrayExecution = 2,
        ClientLocale = 3,
        SupportsLargeBulkOperations = 4,
        DistributionEnabled = 5,
        PrimaryConnectionId = 6,
        PrimaryConnectionHost = 7,
        PrimaryConnectionPort = 8,
        CompleteDatatypeSupport = 9,
        LargeNumberOfParametersSupport = 10,
        SystemId = 11,
        DataFormatVersion = 12,
        AbapVarcharMode = 13,
        SelectForUpdateSupported = 14,
        ClientDistributionMode = 15,
        EngineDataFormatVersion = 16,
        DistributionProtocolVersion = 17,
        SplitBatchCommands = 18,
        UseTransactionFlagsOnly = 19,
        RowSlotImageParameter = 20,
        IgnoreUnknownPartKinds = 21,
        TableOutputParameter = 22,
        DataFormatVersion2 = 23,
        ItabParameter = 24,
        DescribeTableOutputParameter = 25,
        ColumnarResultSet = 26,
        ScrollableResultSet = 27,
        ClientInfoNullValueSupported = 28,
        AssociatedConnectionId = 29,
        NonTransactionalPrepare = 30,
        FdaEnabled = 31,
        OsUser = 32,
        RowSlotImageResultSet = 33,
        Endianness = 34,
        UpdateTopologyAnswer = 35,
        ImplicitLobStreaming = 36,
    }
}

option_key! {
    /// Execution context reported with a statement reply.
    StatementContext => enum StatementContextOption {
        StatementSequenceInfo = 1,
        ServerProcessingTime = 2,
        SchemaName = 3,
        FlagSet = 4,
        QueryTimeout = 5,
        ClientReconnectionWaitTimeout = 6,
        ServerCpuTime = 7,
        ServerMemoryUsage = 8,
    }
}

option_key! {
    /// Transaction state change reported with a reply.
    TransactionFlags => enum TransactionFlag {
        RolledBack = 0,
        Committed = 1,
        NewIsolationLevel = 2,
        DdlCommitModeChanged = 3,
        WriteTransactionStarted = 4,
        NoWriteTransactionStarted = 5,
        SessionClosingTransactionError = 6,
    }
}

option_key! {
    /// Attributes of one host, one line per host.
    TopologyInformation => enum TopologyOption {
        HostName = 1,
        HostPortNumber = 2,
        TenantName = 3,
        LoadFactor = 4,
        VolumeId = 5,
        IsMaster = 6,
        IsCurrentSession = 7,
        ServiceType = 8,
        NetworkDomain = 9,
        IsStandby = 10,
        AllIpAddresses = 11,
        AllHostNames = 12,
        SiteType = 13,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn key_codes() {
        assert_eq!(ConnectOption::from(3), ConnectOption::ClientLocale);
        assert_eq!(i8::from(ConnectOption::DataFormatVersion2), 23);
        assert_eq!(TransactionFlag::from(0), TransactionFlag::RolledBack);
        assert_eq!(TopologyOption::from(100), TopologyOption::Other(100));
        assert_eq!(i8::from(TopologyOption::Other(100)), 100);
        assert_eq!(format!("{:?}", StatementContextOption::from(-1)), "Other(-1)");
        assert_eq!(<TransactionFlag as OptionKey>::PART, PartKind::TransactionFlags);
    }

    #[test]
    fn other_with_known_code() {
        assert_eq!(ConnectOption::Other(1), ConnectOption::ConnectionId);
        assert_ne!(ConnectOption::Other(1), ConnectOption::Other(2));
        assert_eq!(format!("{:?}", ConnectOption::from(i8::from(ConnectOption::Other(3)))), "ClientLocale");
    }
}
