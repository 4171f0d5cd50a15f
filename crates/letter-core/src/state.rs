//! Form state for both letters
//!
//! Field names are fixed. Updates for unknown names are ignored so the DOM
//! cannot grow the state. Values are stored verbatim and trimmed at render time.

use crate::locale::today_iso;

/// GDPR request kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Information,
    Erasure,
}

impl RequestType {
    /// Anything other than `erasure` reads as an information request
    pub fn from_value(value: &str) -> Self {
        match value {
            "erasure" => Self::Erasure,
            _ => Self::Information,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Information => "information",
            Self::Erasure => "erasure",
        }
    }
}

/// Withdrawal-notice agreement kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgreementType {
    Service,
    Purchase,
}

impl AgreementType {
    /// Anything other than `purchase` reads as a service agreement
    pub fn from_value(value: &str) -> Self {
        match value {
            "purchase" => Self::Purchase,
            _ => Self::Service,
        }
    }

    /// Template key under `angrerett.templates`
    pub fn template_key(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Purchase => "purchase",
        }
    }
}

/// GDPR request form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GdprForm {
    pub request_type: String,
    pub controller_name: String,
    pub controller_address: String,
    pub controller_email: String,
    pub subject_name: String,
    pub subject_address: String,
    pub reference_id: String,
    pub data_source: String,
    pub request_date: String,
}

impl GdprForm {
    /// Empty form with the request date set to `today`
    pub fn new(today: impl Into<String>) -> Self {
        Self {
            request_type: RequestType::Information.as_str().to_string(),
            controller_name: String::new(),
            controller_address: String::new(),
            controller_email: String::new(),
            subject_name: String::new(),
            subject_address: String::new(),
            reference_id: String::new(),
            data_source: String::new(),
            request_date: today.into(),
        }
    }

    pub fn request_type(&self) -> RequestType {
        RequestType::from_value(&self.request_type)
    }

    /// Set a field by its form name. Returns `false` for unknown names.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "requestType" => &mut self.request_type,
            "controllerName" => &mut self.controller_name,
            "controllerAddress" => &mut self.controller_address,
            "controllerEmail" => &mut self.controller_email,
            "subjectName" => &mut self.subject_name,
            "subjectAddress" => &mut self.subject_address,
            "referenceId" => &mut self.reference_id,
            "dataSource" => &mut self.data_source,
            "requestDate" => &mut self.request_date,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

impl Default for GdprForm {
    fn default() -> Self {
        Self::new(today_iso())
    }
}

/// Withdrawal-notice (angrerett) form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementForm {
    pub agreement_type: String,
    pub company_name: String,
    pub account_ref: String,
    pub agreement_date: String,
    pub delivery_date: String,
    pub item_description: String,
    pub customer_name: String,
    pub today_date: String,
}

impl AgreementForm {
    pub fn new(today: impl Into<String>) -> Self {
        Self {
            agreement_type: AgreementType::Service.template_key().to_string(),
            company_name: String::new(),
            account_ref: String::new(),
            agreement_date: String::new(),
            delivery_date: String::new(),
            item_description: String::new(),
            customer_name: String::new(),
            today_date: today.into(),
        }
    }

    pub fn agreement_type(&self) -> AgreementType {
        AgreementType::from_value(&self.agreement_type)
    }

    /// Set a field by its form name. Returns `false` for unknown names.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "agreementType" => &mut self.agreement_type,
            "companyName" => &mut self.company_name,
            "accountRef" => &mut self.account_ref,
            "agreementDate" => &mut self.agreement_date,
            "deliveryDate" => &mut self.delivery_date,
            "itemDescription" => &mut self.item_description,
            "customerName" => &mut self.customer_name,
            "todayDate" => &mut self.today_date,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

impl Default for AgreementForm {
    fn default() -> Self {
        Self::new(today_iso())
    }
}

/// Trimmed value, or `placeholder` when the value is blank
pub fn or_placeholder(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gdpr_defaults() {
        let form = GdprForm::new("2024-01-15");
        assert_eq!(form.request_type(), RequestType::Information);
        assert_eq!(form.request_date, "2024-01-15");
        assert!(form.controller_name.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut form = GdprForm::new("2024-01-15");
        let before = form.clone();
        assert!(!form.set_field("favouriteColour", "blue"));
        assert!(!form.set_field("controller_name", "snake case"));
        assert_eq!(form, before);

        let mut agreement = AgreementForm::new("2024-01-15");
        assert!(!agreement.set_field("requestType", "erasure"));
    }

    #[test]
    fn test_set_field_stores_raw_value() {
        let mut form = AgreementForm::new("2024-01-15");
        assert!(form.set_field("companyName", "  Acme AS "));
        assert_eq!(form.company_name, "  Acme AS ");
        assert!(form.set_field("agreementType", "purchase"));
        assert_eq!(form.agreement_type(), AgreementType::Purchase);
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder("  Jane  ", "[Name]"), "Jane");
        assert_eq!(or_placeholder(" \t ", "[Name]"), "[Name]");
    }

    proptest! {
        /// Property: only `purchase` selects the purchase template
        #[test]
        fn agreement_type_defaults_to_service(value in ".{0,20}") {
            let expected = if value == "purchase" { AgreementType::Purchase } else { AgreementType::Service };
            prop_assert_eq!(AgreementType::from_value(&value), expected);
        }

        /// Property: only `erasure` selects the erasure branch
        #[test]
        fn request_type_defaults_to_information(value in ".{0,20}") {
            let expected = if value == "erasure" { RequestType::Erasure } else { RequestType::Information };
            prop_assert_eq!(RequestType::from_value(&value), expected);
        }
    }
}
