//! Upload kind definitions.
//!
//! Each bulk-upload wizard targets one backend entity. The protocol is
//! identical across kinds; what varies is the endpoint slug, the display
//! label used in log messages, the wire field names identifying a row,
//! and a few presentation details.

use serde::{Deserialize, Serialize};

/// The entity a bulk upload ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Customer,
    AmcContract,
    WarrantyCode,
}

/// How `latestRecords` entries are surfaced in the live log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLogStyle {
    /// Log every failed row ("Failed: {id} ({name}) - {error}").
    FailedOnly,
    /// Log the most recent row with a status-mapped severity.
    LastRecord,
    /// Rows are not logged individually.
    None,
}

impl UploadKind {
    /// All upload kinds, in menu order.
    pub const ALL: &'static [UploadKind] = &[
        UploadKind::Customer,
        UploadKind::AmcContract,
        UploadKind::WarrantyCode,
    ];

    /// Endpoint path segment: `POST <base>/bulk/<slug>/bulk-upload`.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::AmcContract => "amccontract",
            Self::WarrantyCode => "warranty-code",
        }
    }

    /// Human-readable label used in log messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::AmcContract => "AMC Contract",
            Self::WarrantyCode => "Warranty Code",
        }
    }

    /// Parse an endpoint slug. Returns `None` for unknown values.
    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "amccontract" => Some(Self::AmcContract),
            "warranty-code" => Some(Self::WarrantyCode),
            _ => None,
        }
    }

    /// Wire field carrying the row's domain identifier.
    pub fn identifier_field(&self) -> &'static str {
        match self {
            Self::Customer => "customercodeid",
            Self::AmcContract => "serialnumber",
            Self::WarrantyCode => "warrantycodeid",
        }
    }

    /// Secondary wire field shown next to the identifier, if any.
    pub fn display_field(&self) -> Option<&'static str> {
        match self {
            Self::Customer => Some("customername"),
            Self::AmcContract => Some("salesdoc"),
            Self::WarrantyCode => None,
        }
    }

    /// File name offered for the downloadable CSV template.
    pub fn template_filename(&self) -> &'static str {
        match self {
            Self::Customer => "customer_template.csv",
            Self::AmcContract => "amc_contract_template.csv",
            Self::WarrantyCode => "warranty_code_template.csv",
        }
    }

    /// Whether the server reports only failed rows in `results`.
    ///
    /// Customer uploads get the reduced "All Failed"/"Failed" filter
    /// pair; the others get the full status filter set.
    pub fn failed_only_results(&self) -> bool {
        matches!(self, Self::Customer)
    }

    /// Whether the server processes this kind in batches. Batch-oriented
    /// kinds include batch totals in the completion message.
    pub fn batch_oriented(&self) -> bool {
        matches!(self, Self::Customer | Self::AmcContract)
    }

    /// How per-row `latestRecords` entries are logged for this kind.
    pub fn row_log_style(&self) -> RowLogStyle {
        match self {
            Self::Customer => RowLogStyle::FailedOnly,
            Self::AmcContract => RowLogStyle::LastRecord,
            Self::WarrantyCode => RowLogStyle::None,
        }
    }
}

impl std::fmt::Display for UploadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trip() {
        for kind in UploadKind::ALL {
            assert_eq!(UploadKind::from_slug(kind.slug()), Some(*kind));
        }
    }

    #[test]
    fn unknown_slug_is_none() {
        assert_eq!(UploadKind::from_slug("product"), None);
        assert_eq!(UploadKind::from_slug(""), None);
    }

    #[test]
    fn customer_results_are_failed_only() {
        assert!(UploadKind::Customer.failed_only_results());
        assert!(!UploadKind::AmcContract.failed_only_results());
        assert!(!UploadKind::WarrantyCode.failed_only_results());
    }

    #[test]
    fn labels_match_wire_slugs() {
        assert_eq!(UploadKind::Customer.slug(), "customer");
        assert_eq!(UploadKind::AmcContract.slug(), "amccontract");
        assert_eq!(UploadKind::WarrantyCode.slug(), "warranty-code");
    }
}
