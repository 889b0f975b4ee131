//! Quote request options and the computed breakdown

use serde::{Deserialize, Serialize};

/// Motorcycle dispatch urgency surcharge tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    #[default]
    Normal,
    /// 긴급
    Urgent,
    /// 우천
    Rain,
}

impl UrgencyTier {
    pub fn amount(&self) -> u64 {
        match self {
            UrgencyTier::Normal => 0,
            UrgencyTier::Urgent => 10_000,
            UrgencyTier::Rain => 20_000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::Normal => "일반",
            UrgencyTier::Urgent => "긴급",
            UrgencyTier::Rain => "우천",
        }
    }
}

/// Options chosen for a single quote. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteOptions {
    pub round_trip: bool,
    pub wait_minutes: u32,
    pub holiday: bool,
    pub urgency: UrgencyTier,
    pub rack_fee: bool,
    pub include_tax: bool,
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self {
            round_trip: false,
            wait_minutes: 0,
            holiday: false,
            urgency: UrgencyTier::Normal,
            rack_fee: false,
            include_tax: true,
        }
    }
}

impl QuoteOptions {
    /// Parse operator-entered wait minutes. Anything that is not a
    /// non-negative integer counts as no waiting.
    pub fn parse_wait_minutes(text: &str) -> u32 {
        text.trim().parse::<i64>().ok().map_or(0, |m| {
            u32::try_from(m.max(0)).unwrap_or(u32::MAX)
        })
    }

    pub fn with_wait_text(mut self, text: &str) -> Self {
        self.wait_minutes = Self::parse_wait_minutes(text);
        self
    }
}

/// Format won with thousands separators: 1234567 → "1,234,567"
pub fn format_won(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One printable charge line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub label: &'static str,
    pub amount: u64,
}

/// Itemized quote. Every surcharge is kept so the receipt can list it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub base_fare: u64,
    pub round_trip_surcharge: u64,
    pub wait_surcharge: u64,
    pub holiday_surcharge: u64,
    pub misc_surcharge: u64,
    /// 공급가액
    pub subtotal: u64,
    /// 부가세
    pub tax: u64,
    pub total: u64,
}

impl QuoteResult {
    /// Base fare followed by the non-zero surcharges, in receipt order
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut items = vec![LineItem {
            label: "기본 운임",
            amount: self.base_fare,
        }];

        let surcharges = [
            ("왕복 할증", self.round_trip_surcharge),
            ("대기료", self.wait_surcharge),
            ("휴일/야간 할증", self.holiday_surcharge),
            ("오토바이/기타 할증", self.misc_surcharge),
        ];
        items.extend(
            surcharges
                .into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(label, amount)| LineItem { label, amount }),
        );
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wait_minutes() {
        assert_eq!(QuoteOptions::parse_wait_minutes("25"), 25);
        assert_eq!(QuoteOptions::parse_wait_minutes(" 40 "), 40);
        assert_eq!(QuoteOptions::parse_wait_minutes("-5"), 0);
        assert_eq!(QuoteOptions::parse_wait_minutes("abc"), 0);
        assert_eq!(QuoteOptions::parse_wait_minutes(""), 0);
    }

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(0), "0");
        assert_eq!(format_won(999), "999");
        assert_eq!(format_won(1_000), "1,000");
        assert_eq!(format_won(18_700), "18,700");
        assert_eq!(format_won(1_234_567), "1,234,567");
    }

    #[test]
    fn test_tax_included_by_default() {
        assert!(QuoteOptions::default().include_tax);
    }

    #[test]
    fn test_line_items_skip_zero_surcharges() {
        let result = QuoteResult {
            base_fare: 30_000,
            wait_surcharge: 2_000,
            subtotal: 32_000,
            total: 32_000,
            ..Default::default()
        };
        let labels: Vec<_> = result.line_items().iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["기본 운임", "대기료"]);
    }
}
