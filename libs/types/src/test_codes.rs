//! Test vocabulary translation between scheduling and billing
//!
//! A booking names the ordered test in scheduling terms (`test_1`) while
//! the claim bills it as a medical service (`medical_service_1`). The map
//! is built once, never mutated, and owned by whoever scores pairs.

use crate::errors::TestCodeError;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Immutable lookup from booking test id to expected claim service code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCodeMap {
    codes: BTreeMap<String, String>,
}

/// One row of the external table format
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TestCodeEntry {
    booking_test_id: String,
    claim_test_id: String,
}

/// Accepted external layouts: a list of entries or a flat object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TestCodeTable {
    Entries(Vec<TestCodeEntry>),
    Flat(FlatEntries),
}

/// Flat object kept as raw pairs so repeated keys reach `from_pairs`
#[derive(Debug)]
struct FlatEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for FlatEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlatVisitor;

        impl<'de> Visitor<'de> for FlatVisitor {
            type Value = FlatEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of test id to service code")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry::<String, String>()? {
                    pairs.push(pair);
                }
                Ok(FlatEntries(pairs))
            }
        }

        deserializer.deserialize_map(FlatVisitor)
    }
}

impl TestCodeMap {
    /// Build from `(booking test id, claim service code)` pairs.
    ///
    /// A test listed twice must agree with itself; the same service code may
    /// back several tests.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, TestCodeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut codes: BTreeMap<String, String> = BTreeMap::new();

        for (index, (test, code)) in pairs.into_iter().enumerate() {
            let test = test.into();
            let code = code.into();
            if test.is_empty() || code.is_empty() {
                return Err(TestCodeError::EmptyCode { index });
            }

            if let Some(existing) = codes.get(&test) {
                if *existing != code {
                    return Err(TestCodeError::ConflictingEntry {
                        test,
                        first: existing.clone(),
                        second: code,
                    });
                }
                continue;
            }
            codes.insert(test, code);
        }

        Ok(Self { codes })
    }

    /// Parse the JSON table format.
    ///
    /// Either `[{"bookingTestId": "test_1", "claimTestId": "medical_service_1"}]`
    /// or `{"test_1": "medical_service_1"}`.
    pub fn from_json(json: &str) -> Result<Self, TestCodeError> {
        match serde_json::from_str::<TestCodeTable>(json)? {
            TestCodeTable::Entries(entries) => Self::from_pairs(
                entries
                    .into_iter()
                    .map(|e| (e.booking_test_id, e.claim_test_id)),
            ),
            TestCodeTable::Flat(FlatEntries(pairs)) => Self::from_pairs(pairs),
        }
    }

    /// Service code a claim must carry to satisfy the test check.
    ///
    /// `None` for unknown tests; such bookings never pass the check.
    pub fn expected_service_code(&self, test: &str) -> Option<&str> {
        self.codes.get(test).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for TestCodeMap {
    /// The table currently deployed between the two systems.
    fn default() -> Self {
        let codes = [
            ("test_1", "medical_service_1"),
            ("test_2", "medical_service_2"),
        ]
        .into_iter()
        .map(|(test, code)| (test.to_string(), code.to_string()))
        .collect();

        Self { codes }
    }
}
