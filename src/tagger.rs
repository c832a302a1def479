//! Service-name tagging
//!
//! Stamps a fixed service name onto every record that passes through a
//! sink, so multi-service deployments writing to shared output can tell
//! the emitters apart.

use crate::record::LogRecord;

/// Stamps a fixed service name onto records.
///
/// Stateless beyond the bound name and never suppresses a record. One
/// tagger can be shared across sinks, or each sink can hold its own
/// clone; the two are equivalent.
#[derive(Debug, Clone)]
pub struct RecordTagger {
    service_name: String,
}

impl RecordTagger {
    /// Create a tagger bound to the given service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    /// The bound service name
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Attach the bound service name to the record, overwriting any
    /// value already present.
    pub fn tag(&self, record: &mut LogRecord) {
        record.service = self.service_name.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LogLevel;

    #[test]
    fn test_tag_sets_service_name() {
        let tagger = RecordTagger::new("market-data-gateway");
        let mut record = LogRecord::new(LogLevel::Info, "test", "hello");
        tagger.tag(&mut record);
        assert_eq!(record.service, "market-data-gateway");
    }

    #[test]
    fn test_tag_overwrites_existing_value() {
        let tagger = RecordTagger::new("order-router");
        let mut record = LogRecord::new(LogLevel::Warn, "test", "hello");
        record.service = "stale".to_string();
        tagger.tag(&mut record);
        assert_eq!(record.service, "order-router");
    }

    #[test]
    fn test_shared_and_cloned_taggers_agree() {
        let tagger = RecordTagger::new("risk-engine");
        let clone = tagger.clone();

        let mut a = LogRecord::new(LogLevel::Info, "test", "a");
        let mut b = LogRecord::new(LogLevel::Info, "test", "b");
        tagger.tag(&mut a);
        clone.tag(&mut b);
        assert_eq!(a.service, b.service);
    }
}
