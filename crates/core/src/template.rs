//! Static CSV templates offered for download.
//!
//! Each upload kind has a fixed header row and three blank sample rows.
//! Content is generated client-side; the server never sees it.

use crate::kind::UploadKind;

const CUSTOMER_TEMPLATE: &str = "\
CustomerCode,Name1,Name2,Street,City,PostalCode,District,Region,Country,Telephone,Tax Number1,Tax Number2,Email
,,,,,,,,,,,,,
,,,,,,,,,,,,,
,,,,,,,,,,,,,";

const AMC_CONTRACT_TEMPLATE: &str = "\
Sales Doc,Start Date,End Date,SA Type,Serial Number,Material Code
,,,,,
,,,,,
,,,,,";

const WARRANTY_CODE_TEMPLATE: &str = "\
Warranty Code,Description,Months
,,
,,
,,";

/// CSV template content for an upload kind.
pub fn template_csv(kind: UploadKind) -> &'static str {
    match kind {
        UploadKind::Customer => CUSTOMER_TEMPLATE,
        UploadKind::AmcContract => AMC_CONTRACT_TEMPLATE,
        UploadKind::WarrantyCode => WARRANTY_CODE_TEMPLATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_header_and_three_blank_rows() {
        for kind in UploadKind::ALL {
            let lines: Vec<_> = template_csv(*kind).lines().collect();
            assert_eq!(lines.len(), 4, "kind: {kind}");
            assert!(!lines[0].is_empty());
            for blank in &lines[1..] {
                assert!(blank.chars().all(|c| c == ','), "kind: {kind}");
            }
        }
    }

    #[test]
    fn customer_template_headers() {
        let header = template_csv(UploadKind::Customer).lines().next().unwrap();
        assert!(header.starts_with("CustomerCode,Name1,Name2,"));
        assert!(header.ends_with(",Email"));
    }

    #[test]
    fn warranty_template_columns() {
        let header = template_csv(UploadKind::WarrantyCode).lines().next().unwrap();
        assert_eq!(header, "Warranty Code,Description,Months");
    }

    #[test]
    fn template_filenames_are_kind_specific() {
        assert_eq!(
            UploadKind::AmcContract.template_filename(),
            "amc_contract_template.csv"
        );
    }
}
