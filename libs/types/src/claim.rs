//! Billing-side claim records

use crate::errors::{RecordKind, ValidationError};
use crate::ids::{ClaimId, PatientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One billed service as exported by the billing system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Claim {
    pub id: ClaimId,
    /// Service identifier in the billing vocabulary
    pub medical_service_code: String,
    pub booking_date: DateTime<Utc>,
    pub insurance: String,
    pub patient: PatientId,
}

impl Claim {
    pub fn new(
        id: impl Into<String>,
        medical_service_code: impl Into<String>,
        booking_date: DateTime<Utc>,
        insurance: impl Into<String>,
        patient: impl Into<String>,
    ) -> Self {
        Self {
            id: ClaimId::new(id),
            medical_service_code: medical_service_code.into(),
            booking_date,
            insurance: insurance.into(),
            patient: PatientId::new(patient),
        }
    }

    /// Check that every string field is non-empty.
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let fields = [
            ("id", self.id.is_empty()),
            ("medicalServiceCode", self.medical_service_code.is_empty()),
            ("insurance", self.insurance.is_empty()),
            ("patient", self.patient.is_empty()),
        ];

        match fields.iter().find(|(_, empty)| *empty) {
            Some((field, _)) => Err(ValidationError::EmptyField {
                record: RecordKind::Claim,
                index,
                field: *field,
            }),
            None => Ok(()),
        }
    }
}
