#![allow(dead_code)]

use coinbase_checkout::domain::payment::{Payment, ReturnUrls};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

/// `md5("coinbase-abc123-K")`
pub const GOLDEN_TOKEN: &str = "437211dfa0242ca1f77a065b2b6b5693";

pub fn payment(token: &str, total: Decimal) -> Payment {
    Payment::new(
        token,
        format!("Order {}", token),
        total,
        "USD",
        ReturnUrls {
            process: format!("https://shop.test/payments/process/{}", token),
            success: format!("https://shop.test/payments/success/{}", token),
            failure: format!("https://shop.test/payments/failure/{}", token),
        },
    )
}

pub fn callback_body(custom: &str, transaction_id: &str) -> String {
    format!(
        r#"{{"order":{{"custom":"{}","transaction":{{"id":"{}"}}}}}}"#,
        custom, transaction_id
    )
}

pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}
