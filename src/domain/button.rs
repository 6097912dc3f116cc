use super::payment::Payment;
use serde::Serialize;
use std::collections::BTreeMap;

/// Attributes of a checkout button, kept in lexicographic key order.
///
/// The request signature covers the exact serialized bytes, so the body must
/// come out identical for identical data no matter the order in which the
/// attributes were set. `BTreeMap` guarantees that ordering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ButtonAttributes(BTreeMap<&'static str, String>);

impl ButtonAttributes {
    pub const NAME: &'static str = "name";
    pub const PRICE: &'static str = "price_string";
    pub const CURRENCY: &'static str = "price_currency_iso";
    pub const CALLBACK_URL: &'static str = "callback_url";
    pub const SUCCESS_URL: &'static str = "success_url";
    pub const CANCEL_URL: &'static str = "cancel_url";
    pub const CUSTOM: &'static str = "custom";

    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the attribute set for `payment`, tagged with its custom token.
    pub fn for_payment(payment: &Payment, custom_token: String) -> Self {
        let mut attributes = Self::new();
        attributes.set(Self::NAME, payment.description.clone());
        attributes.set(Self::PRICE, payment.total.to_string());
        attributes.set(Self::CURRENCY, payment.currency.clone());
        attributes.set(Self::CALLBACK_URL, payment.process_url());
        attributes.set(Self::SUCCESS_URL, payment.success_url());
        attributes.set(Self::CANCEL_URL, payment.failure_url());
        attributes.set(Self::CUSTOM, custom_token);
        attributes
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        self.0.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

#[derive(Serialize)]
struct ButtonRequest<'a> {
    button: &'a ButtonAttributes,
}

/// Serializes `{"button": {...}}` with sorted keys and no insignificant
/// whitespace.
pub fn canonical_body(attributes: &ButtonAttributes) -> serde_json::Result<String> {
    serde_json::to_string(&ButtonRequest { button: attributes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::ReturnUrls;
    use rust_decimal_macros::dec;

    fn payment() -> Payment {
        Payment::new(
            "abc123",
            "Order #1",
            dec!(10.50),
            "USD",
            ReturnUrls {
                process: "https://shop.test/process".to_string(),
                success: "https://shop.test/success".to_string(),
                failure: "https://shop.test/failure".to_string(),
            },
        )
    }

    #[test]
    fn test_attributes_from_payment() {
        let attributes = ButtonAttributes::for_payment(&payment(), "tok".to_string());
        assert_eq!(attributes.get(ButtonAttributes::NAME), Some("Order #1"));
        assert_eq!(attributes.get(ButtonAttributes::PRICE), Some("10.50"));
        assert_eq!(attributes.get(ButtonAttributes::CURRENCY), Some("USD"));
        assert_eq!(
            attributes.get(ButtonAttributes::CALLBACK_URL),
            Some("https://shop.test/process")
        );
        assert_eq!(
            attributes.get(ButtonAttributes::CANCEL_URL),
            Some("https://shop.test/failure")
        );
        assert_eq!(attributes.get(ButtonAttributes::CUSTOM), Some("tok"));
    }

    #[test]
    fn test_keys_are_sorted() {
        let attributes = ButtonAttributes::for_payment(&payment(), "tok".to_string());
        let keys: Vec<_> = attributes.keys().collect();
        assert_eq!(
            keys,
            vec![
                "callback_url",
                "cancel_url",
                "custom",
                "name",
                "price_currency_iso",
                "price_string",
                "success_url",
            ]
        );
    }

    #[test]
    fn test_body_is_independent_of_insertion_order() {
        let mut forward = ButtonAttributes::new();
        forward
            .set(ButtonAttributes::NAME, "Order")
            .set(ButtonAttributes::PRICE, "1.00")
            .set(ButtonAttributes::CUSTOM, "tok");

        let mut backward = ButtonAttributes::new();
        backward
            .set(ButtonAttributes::CUSTOM, "tok")
            .set(ButtonAttributes::PRICE, "1.00")
            .set(ButtonAttributes::NAME, "Order");

        assert_eq!(
            canonical_body(&forward).unwrap(),
            canonical_body(&backward).unwrap()
        );
    }

    #[test]
    fn test_canonical_body_layout() {
        let mut attributes = ButtonAttributes::new();
        attributes
            .set(ButtonAttributes::PRICE, "1.00")
            .set(ButtonAttributes::NAME, "Order \"A\"");

        assert_eq!(
            canonical_body(&attributes).unwrap(),
            r#"{"button":{"name":"Order \"A\"","price_string":"1.00"}}"#
        );
    }
}
