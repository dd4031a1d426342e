use rust_decimal::Decimal;
use serde::Serialize;

/// A single tagged parameter in the gateway request body.
///
/// Serializes with the gateway's historical field names: the payload value
/// goes out as `_`, the correlation key as `GroupID`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRecord {
    #[serde(rename = "_")]
    pub value: ParameterValue,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Group")]
    pub group: RecordGroup,
    #[serde(rename = "GroupID", serialize_with = "serialize_group_index")]
    pub group_index: Option<u32>,
}

fn serialize_group_index<S>(index: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match index {
        Some(idx) => serializer.serialize_u32(*idx),
        None => serializer.serialize_str(""),
    }
}

/// Logical entity tag partitioning the flat record sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, Serialize)]
pub enum RecordGroup {
    BillingCustomer,
    ShippingCustomer,
    Article,
}

/// Record values are either free text or a numeric amount; the gateway
/// accepts both in the same position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Text(String),
    Amount(Decimal),
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Decimal> for ParameterValue {
    fn from(value: Decimal) -> Self {
        Self::Amount(value)
    }
}

/// Ordered record sequence for one transaction.
///
/// Grouping and relative group order are part of the gateway contract, so
/// mutation goes through `push`/`append`/`patch` and records keep their
/// emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<ParameterRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ParameterRecord) {
        self.records.push(record);
    }

    pub fn append(&mut self, records: impl IntoIterator<Item = ParameterRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[ParameterRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ParameterRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(
        &self,
        group: RecordGroup,
        group_index: Option<u32>,
        name: &str,
    ) -> Option<&ParameterRecord> {
        self.records
            .iter()
            .find(|record| {
                record.group == group && record.group_index == group_index && record.name == name
            })
    }

    /// Overwrites the value of the first `(group, name)` match; when the
    /// field is not present yet a new record with an empty group index is
    /// appended instead.
    pub fn patch(&mut self, group: RecordGroup, name: &str, value: ParameterValue) {
        match self
            .records
            .iter_mut()
            .find(|record| record.group == group && record.name == name)
        {
            Some(record) => record.value = value,
            None => self.records.push(ParameterRecord {
                value,
                name: name.to_string(),
                group,
                group_index: None,
            }),
        }
    }

    /// Distinct group indices present for a group, in first-seen order.
    pub fn distinct_indices(&self, group: RecordGroup) -> Vec<u32> {
        let mut indices = Vec::new();
        for record in &self.records {
            if record.group == group {
                if let Some(index) = record.group_index {
                    if !indices.contains(&index) {
                        indices.push(index);
                    }
                }
            }
        }
        indices
    }
}

/// Gateway service action requested for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, Serialize)]
pub enum ServiceAction {
    Pay,
    Reserve,
    Refund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, Serialize)]
pub enum Channel {
    Web,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, Serialize)]
pub enum RequestMethod {
    TransactionRequest,
}

/// Service envelope around the assembled parameter list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceEnvelope {
    pub name: String,
    pub action: ServiceAction,
    pub version: u8,
    pub request_parameter: RecordSet,
}

/// The finished transaction request handed to the gateway submitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionRequest {
    pub services: ServiceEnvelope,
    pub method: RequestMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_transaction_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(group: RecordGroup, name: &str, value: &str) -> ParameterRecord {
        ParameterRecord {
            value: value.into(),
            name: name.to_string(),
            group,
            group_index: None,
        }
    }

    #[test]
    fn patch_overwrites_existing_record_in_place() {
        let mut records = RecordSet::new();
        records.push(record(RecordGroup::ShippingCustomer, "Street", "Main Street"));
        records.push(record(RecordGroup::ShippingCustomer, "City", "Amsterdam"));

        records.patch(RecordGroup::ShippingCustomer, "Street", "Locker Lane".into());

        assert_eq!(records.len(), 2);
        let street = records
            .find(RecordGroup::ShippingCustomer, None, "Street")
            .expect("street record");
        assert_eq!(street.value, ParameterValue::Text("Locker Lane".to_string()));
    }

    #[test]
    fn patch_appends_missing_record_with_empty_index() {
        let mut records = RecordSet::new();
        records.push(record(RecordGroup::ShippingCustomer, "Street", "Main Street"));

        records.patch(
            RecordGroup::ShippingCustomer,
            "StreetNumber",
            "12".into(),
        );

        assert_eq!(records.len(), 2);
        let number = records
            .find(RecordGroup::ShippingCustomer, None, "StreetNumber")
            .expect("appended record");
        assert_eq!(number.group_index, None);
    }

    #[test]
    fn patch_does_not_touch_other_groups() {
        let mut records = RecordSet::new();
        records.push(record(RecordGroup::BillingCustomer, "Street", "Main Street"));

        records.patch(RecordGroup::ShippingCustomer, "Street", "Locker Lane".into());

        let billing = records
            .find(RecordGroup::BillingCustomer, None, "Street")
            .expect("billing street");
        assert_eq!(billing.value, ParameterValue::Text("Main Street".to_string()));
    }

    #[test]
    fn group_index_serializes_as_empty_string_when_absent() {
        let record = record(RecordGroup::BillingCustomer, "FirstName", "John");
        let json = serde_json::to_value(&record).expect("serializable record");
        assert_eq!(json["GroupID"], serde_json::json!(""));
        assert_eq!(json["Name"], serde_json::json!("FirstName"));
        assert_eq!(json["_"], serde_json::json!("John"));
    }
}
