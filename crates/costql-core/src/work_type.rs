use serde::Serialize;

/// Category of work a request causes.
///
/// The declaration order is the slot order inside a [`Price`](crate::Price).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum WorkType {
    #[serde(rename = "access")]
    InstanceAccess,
    #[serde(rename = "trivial")]
    TrivialReturn,
    #[serde(rename = "local")]
    LocalCall,
    #[serde(rename = "join")]
    BulkJoin,
    #[serde(rename = "fast")]
    EfficientRemoteCall,
    #[serde(rename = "slow")]
    InefficientRemoteCall,
}

impl WorkType {
    pub const COUNT: usize = 6;

    pub const ALL: [WorkType; Self::COUNT] = [
        WorkType::InstanceAccess,
        WorkType::TrivialReturn,
        WorkType::LocalCall,
        WorkType::BulkJoin,
        WorkType::EfficientRemoteCall,
        WorkType::InefficientRemoteCall,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Key used for this work type inside directive price objects.
    pub fn id(self) -> &'static str {
        match self {
            WorkType::InstanceAccess => "access",
            WorkType::TrivialReturn => "trivial",
            WorkType::LocalCall => "local",
            WorkType::BulkJoin => "join",
            WorkType::EfficientRemoteCall => "fast",
            WorkType::InefficientRemoteCall => "slow",
        }
    }

    /// Short column heading for reports.
    pub fn heading(self) -> &'static str {
        match self {
            WorkType::InstanceAccess => "Raw#",
            WorkType::TrivialReturn => "Basic",
            WorkType::LocalCall => "Local",
            WorkType::BulkJoin => "Joins",
            WorkType::EfficientRemoteCall => "Fast",
            WorkType::InefficientRemoteCall => "Slow",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WorkType::InstanceAccess => "Total count of instance accesses.",
            WorkType::TrivialReturn => "Trivial derivations from prefetched data.",
            WorkType::LocalCall => "Same-machine in- or inter-process calls.",
            WorkType::BulkJoin => "Bulk data gathers such as DB joins.",
            WorkType::EfficientRemoteCall => "Efficient remote API calls, e.g. DB, GraphQL.",
            WorkType::InefficientRemoteCall => "Inefficient remote API calls, e.g. REST.",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.id() == id)
    }

    pub fn max_heading_len() -> usize {
        Self::ALL.iter().map(|w| w.heading().len()).max().unwrap_or(0)
    }
}
