use serde::{Deserialize, Serialize};

use super::errors::PaymentError;

/// A claim that a specific toll record was paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_id: String,
    pub plate_number: String,
    #[serde(alias = "id")]
    pub toll_record_id: String,
}

impl Payment {
    /// Every field must be non-empty. The plate must also survive trimming,
    /// since a blank plate can never match a stored toll.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.payment_id.is_empty() {
            return Err(PaymentError::ValidationFailed("payment_id"));
        }
        if self.plate_number.trim().is_empty() {
            return Err(PaymentError::ValidationFailed("plate_number"));
        }
        if self.toll_record_id.is_empty() {
            return Err(PaymentError::ValidationFailed("toll_record_id"));
        }
        Ok(())
    }
}

/// The unit carried by one payments-queue message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBatch {
    pub payments: Vec<Payment>,
}

impl PaymentBatch {
    pub fn parse(body: &str) -> Result<Self, PaymentError> {
        serde_json::from_str(body).map_err(|_| PaymentError::MalformedPayload)
    }

    pub fn to_message_body(&self) -> Result<String, PaymentError> {
        serde_json::to_string(self).map_err(|_| PaymentError::MalformedPayload)
    }

    /// Validates every payment; the first invalid field wins.
    pub fn validate(&self) -> Result<(), PaymentError> {
        self.payments.iter().try_for_each(Payment::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(payment_id: &str, plate: &str, toll_record_id: &str) -> Payment {
        Payment {
            payment_id: payment_id.to_string(),
            plate_number: plate.to_string(),
            toll_record_id: toll_record_id.to_string(),
        }
    }

    #[test]
    fn should_accept_payment_with_all_fields() {
        assert!(payment("pay-1", "ABC123", "toll-1").validate().is_ok());
    }

    #[test]
    fn should_reject_payment_with_empty_field() {
        assert!(matches!(
            payment("", "ABC123", "toll-1").validate(),
            Err(PaymentError::ValidationFailed("payment_id"))
        ));
        assert!(matches!(
            payment("pay-1", "  ", "toll-1").validate(),
            Err(PaymentError::ValidationFailed("plate_number"))
        ));
        assert!(matches!(
            payment("pay-1", "ABC123", "").validate(),
            Err(PaymentError::ValidationFailed("toll_record_id"))
        ));
    }

    #[test]
    fn should_accept_whitespace_ids_when_not_empty() {
        assert!(payment(" ", "ABC123", "toll-1").validate().is_ok());
        assert!(payment("pay-1", "ABC123", " ").validate().is_ok());
    }

    #[test]
    fn should_reject_batch_when_any_payment_invalid() {
        let batch = PaymentBatch {
            payments: vec![payment("pay-1", "ABC123", "toll-1"), payment("pay-2", "", "toll-2")],
        };
        assert!(matches!(
            batch.validate(),
            Err(PaymentError::ValidationFailed("plate_number"))
        ));
    }

    #[test]
    fn should_parse_camel_case_body_and_legacy_id_alias() {
        let body = r#"{"payments":[
            {"paymentId":"pay-1","plateNumber":"abc 123","tollRecordId":"toll-1"},
            {"paymentId":"pay-2","plateNumber":"abc 123","id":"toll-2"}
        ]}"#;
        let batch = PaymentBatch::parse(body).unwrap();
        assert_eq!(batch.payments[0].toll_record_id, "toll-1");
        assert_eq!(batch.payments[1].toll_record_id, "toll-2");
    }

    #[test]
    fn should_reject_unparsable_body() {
        assert!(matches!(
            PaymentBatch::parse(r#"{"payments": "nope"}"#),
            Err(PaymentError::MalformedPayload)
        ));
    }

    #[test]
    fn should_serialize_to_message_body_that_parses_back() {
        let batch = PaymentBatch {
            payments: vec![payment("pay-1", "ABC123", "toll-1")],
        };
        let body = batch.to_message_body().unwrap();
        assert!(body.contains("\"tollRecordId\":\"toll-1\""));
        assert_eq!(PaymentBatch::parse(&body).unwrap(), batch);
    }
}
