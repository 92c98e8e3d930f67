//! Acceptability policy for normalized records.

use serde::{Deserialize, Serialize};

use crate::error::{LandmarkError, Result};
use crate::types::record::LandmarkRecord;

/// Decides whether a record carries enough data to build an image prompt.
///
/// An upstream `error` always wins. Otherwise the record is rejected when
/// more than `max_missing_fields` content fields hold `no_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptancePolicy {
    /// Sentinel fields tolerated before rejecting. Default: 1.
    pub max_missing_fields: usize,

    /// Also count fields the model left out entirely. Default: false.
    pub count_absent_as_missing: bool,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            max_missing_fields: 1,
            count_absent_as_missing: false,
        }
    }
}

impl AcceptancePolicy {
    pub fn with_max_missing_fields(mut self, max: usize) -> Self {
        self.max_missing_fields = max;
        self
    }

    pub fn with_count_absent_as_missing(mut self, count: bool) -> Self {
        self.count_absent_as_missing = count;
        self
    }

    /// Number of content fields this policy treats as missing.
    pub fn missing_count(&self, record: &LandmarkRecord) -> usize {
        let sentinels = record.sentinel_fields().len();
        if self.count_absent_as_missing {
            sentinels + record.absent_fields().len()
        } else {
            sentinels
        }
    }

    pub fn check(&self, record: &LandmarkRecord) -> Result<()> {
        if let Some(error) = record.error().filter(|e| !e.is_empty()) {
            return Err(LandmarkError::UpstreamReported(error.to_string()));
        }

        let missing = self.missing_count(record);
        if missing > self.max_missing_fields {
            return Err(LandmarkError::InsufficientData { missing });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::{LandmarkField, NO_VALUE};

    fn complete_record() -> LandmarkRecord {
        LandmarkField::ALL
            .into_iter()
            .fold(LandmarkRecord::new(), |r, f| r.with(f, "known"))
    }

    #[test]
    fn test_complete_record_accepted() {
        assert!(AcceptancePolicy::default().check(&complete_record()).is_ok());
    }

    #[test]
    fn test_one_sentinel_accepted() {
        let record = complete_record().with(LandmarkField::ConstructionCost, NO_VALUE);
        assert!(AcceptancePolicy::default().check(&record).is_ok());
    }

    #[test]
    fn test_two_sentinels_rejected() {
        let record = complete_record()
            .with(LandmarkField::ConstructionCost, NO_VALUE)
            .with(LandmarkField::Architects, NO_VALUE);

        match AcceptancePolicy::default().check(&record) {
            Err(LandmarkError::InsufficientData { missing }) => assert_eq!(missing, 2),
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn test_error_takes_precedence() {
        let record = LandmarkRecord::new()
            .with(LandmarkField::Architects, NO_VALUE)
            .with(LandmarkField::Materials, NO_VALUE)
            .with_error("Unknown landmark");

        match AcceptancePolicy::default().check(&record) {
            Err(LandmarkError::UpstreamReported(msg)) => assert_eq!(msg, "Unknown landmark"),
            other => panic!("expected UpstreamReported, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_error_ignored() {
        let record = complete_record().with_error("");
        assert!(AcceptancePolicy::default().check(&record).is_ok());
    }

    #[test]
    fn test_absent_fields_do_not_count_by_default() {
        let record = LandmarkRecord::new()
            .with(LandmarkField::Description, "Tall, iconic")
            .with(LandmarkField::ConstructionYear, "1889")
            .with(LandmarkField::ImageGenerationPrompt, "Eiffel Tower at sunset");

        assert!(AcceptancePolicy::default().check(&record).is_ok());

        let strict = AcceptancePolicy::default().with_count_absent_as_missing(true);
        assert_eq!(strict.missing_count(&record), 7);
        assert!(matches!(
            strict.check(&record),
            Err(LandmarkError::InsufficientData { missing: 7 })
        ));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let record = complete_record()
            .with(LandmarkField::ConstructionCost, NO_VALUE)
            .with(LandmarkField::Architects, NO_VALUE);

        assert!(AcceptancePolicy::default()
            .with_max_missing_fields(2)
            .check(&record)
            .is_ok());
    }
}
