//! The document kinds: tables that pair metadata with an attached spreadsheet.
//! Table names come only from here, never from a request.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Shipments,
    DispatchOutputs,
    DeliveryForwards,
    Customers,
    Summary,
    ItemSnapshots,
    ItemActivityLogs,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 7] = [
        DocumentKind::Shipments,
        DocumentKind::DispatchOutputs,
        DocumentKind::DeliveryForwards,
        DocumentKind::Customers,
        DocumentKind::Summary,
        DocumentKind::ItemSnapshots,
        DocumentKind::ItemActivityLogs,
    ];

    /// URL segment under `/api`.
    pub fn path_segment(self) -> &'static str {
        match self {
            DocumentKind::Shipments => "shipments",
            DocumentKind::DispatchOutputs => "dispatch-outputs",
            DocumentKind::DeliveryForwards => "delivery-forwards",
            DocumentKind::Customers => "customers",
            DocumentKind::Summary => "summary",
            DocumentKind::ItemSnapshots => "item-snapshots",
            DocumentKind::ItemActivityLogs => "item-activity-logs",
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            DocumentKind::Shipments => "shipments",
            DocumentKind::DispatchOutputs => "dispatch_outputs",
            DocumentKind::DeliveryForwards => "delivery_forwards",
            DocumentKind::Customers => "customers",
            DocumentKind::Summary => "summary",
            DocumentKind::ItemSnapshots => "item_snapshots",
            DocumentKind::ItemActivityLogs => "item_activity_logs",
        }
    }

    /// Singular label for messages, e.g. "dispatch output".
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Shipments => "shipment",
            DocumentKind::DispatchOutputs => "dispatch output",
            DocumentKind::DeliveryForwards => "delivery forward",
            DocumentKind::Customers => "customer",
            DocumentKind::Summary => "summary",
            DocumentKind::ItemSnapshots => "item snapshot",
            DocumentKind::ItemActivityLogs => "item activity log",
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.path_segment() == segment)
    }
}
