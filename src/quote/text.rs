//! Plain-text quote summary and share links

use super::Quote;
use crate::format::format_currency;

const WHATSAPP_BASE_URL: &str = "https://wa.me/?text=";

impl Quote {
    /// One line per option, e.g. `Down payment of R$ 100,00 | 12x of R$ 127,50`
    pub fn option_lines(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|option| {
                let plan = format!("{} of {}", option.label(), format_currency(option.installment_value));
                if self.has_down_payment {
                    format!("Down payment of {} | {}", option.down_payment_display, plan)
                } else {
                    plan
                }
            })
            .collect()
    }

    /// Share text summarising the quote
    pub fn summary_text(&self) -> String {
        let mut text = String::new();
        text.push_str("Installment simulation on store credit (subject to credit analysis)\n\n");
        text.push_str(&format!("Client: {}\n", self.metadata.customer()));
        text.push_str(&format!("Product: {}\n", self.metadata.product()));
        text.push_str(&format!("Date: {}\n", self.metadata.date()));
        text.push_str(&format!("Seller: {}\n", self.metadata.seller()));
        text.push_str("\nInstallment options:\n");
        text.push_str(&self.option_lines().join("\n"));
        text.push_str(&format!("\n\nGenerated by {}", self.brand));
        text
    }

    /// `https://wa.me/?text=...` link carrying the summary
    pub fn whatsapp_url(&self) -> String {
        format!("{}{}", WHATSAPP_BASE_URL, percent_encode(&self.summary_text()))
    }

    /// `mailto:` link with the product in the subject and the summary as body
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:?subject={}&body={}",
            percent_encode(&format!("Quote: {}", self.metadata.product())),
            percent_encode(&self.summary_text())
        )
    }
}

/// Percent-encode every byte outside the URI component unreserved set
/// (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`), UTF-8 aware.
pub fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
