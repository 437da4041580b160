//! Scheduling-side appointment records

use crate::errors::{RecordKind, ValidationError};
use crate::ids::{BookingId, PatientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled appointment as exported by the scheduling system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Booking {
    pub id: BookingId,
    pub patient: PatientId,
    /// Test identifier in the scheduling vocabulary
    pub test: String,
    pub insurance: String,
    pub reservation_date: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        id: impl Into<String>,
        patient: impl Into<String>,
        test: impl Into<String>,
        insurance: impl Into<String>,
        reservation_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BookingId::new(id),
            patient: PatientId::new(patient),
            test: test.into(),
            insurance: insurance.into(),
            reservation_date,
        }
    }

    /// Check that every string field is non-empty.
    ///
    /// `index` is the record's position in its list and is only used for
    /// error reporting.
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let fields = [
            ("id", self.id.is_empty()),
            ("patient", self.patient.is_empty()),
            ("test", self.test.is_empty()),
            ("insurance", self.insurance.is_empty()),
        ];

        match fields.iter().find(|(_, empty)| *empty) {
            Some((field, _)) => Err(ValidationError::EmptyField {
                record: RecordKind::Booking,
                index,
                field: *field,
            }),
            None => Ok(()),
        }
    }
}
