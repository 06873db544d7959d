use crate::errors::ServiceError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Billing details for one invoice, after the amount has been parsed.
///
/// Client name and title are free text: empty strings are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub client_name: String,
    pub video_title: String,
    pub invoice_amount: Decimal,
}

/// Raw form submission from the browser.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InvoiceForm {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub video_title: String,
    #[serde(default)]
    #[validate(custom = "validate_invoice_amount")]
    pub invoice_amount: String,
}

fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("invoice_amount");
        err.message = Some("Invoice amount is required".into());
        return Err(err);
    }
    Decimal::from_str(trimmed).map_err(|_| {
        let mut err = ValidationError::new("invoice_amount");
        // Numeric but wider than Decimal's 96-bit mantissa
        let out_of_range = trimmed.parse::<f64>().map_or(false, f64::is_finite);
        err.message = Some(if out_of_range {
            format!(
                "Invoice amount '{}' exceeds the largest supported amount ({})",
                trimmed,
                Decimal::MAX
            )
            .into()
        } else {
            format!("Invoice amount must be a number, got '{}'", trimmed).into()
        });
        err
    })
}

fn validate_invoice_amount(raw: &str) -> Result<(), ValidationError> {
    parse_amount(raw).map(|_| ())
}

impl TryFrom<InvoiceForm> for InvoiceRequest {
    type Error = ServiceError;

    fn try_from(form: InvoiceForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let invoice_amount = parse_amount(&form.invoice_amount).map_err(|e| {
            ServiceError::ValidationError(
                e.message
                    .map(|m| m.into_owned())
                    .unwrap_or_else(|| "invalid invoice amount".to_string()),
            )
        })?;

        Ok(Self {
            client_name: form.client_name,
            video_title: form.video_title,
            invoice_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn form(amount: &str) -> InvoiceForm {
        InvoiceForm {
            client_name: "Acme Co".into(),
            video_title: "Intro Video".into(),
            invoice_amount: amount.into(),
        }
    }

    #[rstest]
    #[case("150", dec!(150))]
    #[case("0", dec!(0))]
    #[case(" 12.50 ", dec!(12.50))]
    #[case("-20", dec!(-20))]
    fn accepts_any_numeric_amount(#[case] raw: &str, #[case] expected: Decimal) {
        let request = InvoiceRequest::try_from(form(raw)).expect("numeric amount");
        assert_eq!(request.invoice_amount, expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("abc")]
    #[case("12,50")]
    fn rejects_blank_or_non_numeric_amounts(#[case] raw: &str) {
        assert_matches!(
            InvoiceRequest::try_from(form(raw)),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[rstest]
    #[case("1e3", dec!(1000))]
    #[case("1.5E2", dec!(150))]
    fn accepts_scientific_notation(#[case] raw: &str, #[case] expected: Decimal) {
        let request = InvoiceRequest::try_from(form(raw)).expect("scientific amount");
        assert_eq!(request.invoice_amount, expected);
    }

    #[test]
    fn oversized_amount_reports_the_supported_maximum() {
        let err = InvoiceRequest::try_from(form("123456789012345678901234567890")).unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(ref msg) if msg.contains("largest supported amount"));
    }

    #[test]
    fn non_finite_amounts_are_not_numbers() {
        let err = InvoiceRequest::try_from(form("inf")).unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(ref msg) if msg.contains("must be a number"));
    }

    #[test]
    fn free_text_fields_pass_through_unchanged() {
        let request = InvoiceRequest::try_from(InvoiceForm {
            client_name: String::new(),
            video_title: "  spaced  ".into(),
            invoice_amount: "1".into(),
        })
        .unwrap();
        assert_eq!(request.client_name, "");
        assert_eq!(request.video_title, "  spaced  ");
    }
}
