use csv::ByteRecord;
use crate::batch::BatchError;
use crate::models::{MatchOutcome, QueryIdentity};

/// Columns every input table must carry (case-sensitive)
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "FirstName",
    "MiddleName",
    "LastName",
    "City",
    "State",
    "ZipCode",
    "DOBYear",
];

pub const DECISION_COLUMN: &str = "Likely Deceased";
pub const URL_COLUMN: &str = "URL";

/// Positions of the identity columns within the input header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    first_name: usize,
    middle_name: usize,
    last_name: usize,
    city: usize,
    state: usize,
    zip_code: usize,
    dob_year: usize,
}

impl ColumnMap {
    /// Locate the required columns, reporting every missing one at once
    pub fn from_headers(headers: &ByteRecord) -> Result<Self, BatchError> {
        let position = |name: &str| headers.iter().position(|h| h == name.as_bytes());

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(BatchError::MissingHeaders {
                found: headers
                    .iter()
                    .map(|h| String::from_utf8_lossy(h).into_owned())
                    .collect(),
                missing,
            });
        }

        let index = |name: &str| position(name).unwrap_or_default();

        Ok(Self {
            first_name: index("FirstName"),
            middle_name: index("MiddleName"),
            last_name: index("LastName"),
            city: index("City"),
            state: index("State"),
            zip_code: index("ZipCode"),
            dob_year: index("DOBYear"),
        })
    }

    /// Build the query identity for a row
    ///
    /// Short rows read as empty fields. Bytes that are not UTF-8 are replaced
    /// with U+FFFD so such rows are still looked up.
    pub fn identity(&self, record: &ByteRecord) -> QueryIdentity {
        let field = |i: usize| {
            String::from_utf8_lossy(record.get(i).unwrap_or_default())
                .trim()
                .to_string()
        };

        QueryIdentity {
            first_name: field(self.first_name),
            middle_name: field(self.middle_name),
            last_name: field(self.last_name),
            city: field(self.city),
            state: field(self.state),
            zip_code: field(self.zip_code),
            dob_year: field(self.dob_year),
        }
    }
}

/// Input header followed by the decision and URL columns
pub fn output_headers(headers: &ByteRecord) -> ByteRecord {
    let mut out = headers.clone();
    out.push_field(DECISION_COLUMN.as_bytes());
    out.push_field(URL_COLUMN.as_bytes());
    out
}

/// Input row fitted to `width` fields, followed by the outcome columns
///
/// The input fields are copied byte for byte.
pub fn output_row(record: &ByteRecord, width: usize, outcome: &MatchOutcome) -> ByteRecord {
    let mut out = ByteRecord::with_capacity(record.as_slice().len(), width + 2);
    for i in 0..width {
        out.push_field(record.get(i).unwrap_or_default());
    }
    out.push_field(outcome.likely_deceased().as_bytes());
    out.push_field(outcome.url().as_bytes());
    out
}
