//! Receipt (영수증/견적서) layout

use chrono::{NaiveDate, NaiveDateTime};

use bora_domain::model::{format_won, QuoteResult};

use super::quote_service::QuoteRequest;
use crate::config::IssuerInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Title,
    Section,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRow {
    pub kind: RowKind,
    pub label: String,
    pub value: String,
}

impl ReceiptRow {
    fn plain(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: RowKind::Plain,
            label: label.into(),
            value: value.into(),
        }
    }

    fn blank() -> Self {
        Self::plain("", "")
    }

    fn section(label: &str) -> Self {
        Self {
            kind: RowKind::Section,
            label: label.to_string(),
            value: String::new(),
        }
    }
}

/// Two-column receipt document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub rows: Vec<ReceiptRow>,
}

impl Receipt {
    pub fn build(
        issuer: &IssuerInfo,
        request: &QuoteRequest,
        result: &QuoteResult,
        issued_on: NaiveDate,
    ) -> Self {
        let mut rows = vec![
            ReceiptRow {
                kind: RowKind::Title,
                label: format!("{} 운송 영수증(견적서)", issuer.trade_name),
                value: String::new(),
            },
            ReceiptRow::blank(),
            ReceiptRow::blank(),
            ReceiptRow::section("[ 공급자 정보 ]"),
            ReceiptRow::plain("등록번호", &issuer.registration_number),
            ReceiptRow::plain("상    호", &issuer.trade_name),
            ReceiptRow::plain("대 표 자", &issuer.representative),
            ReceiptRow::plain("주    소", &issuer.address),
            ReceiptRow::plain("업    태", &issuer.business_type),
            ReceiptRow::plain("종    목", &issuer.business_items),
            ReceiptRow::blank(),
            ReceiptRow::section("[ 운송 내역 ]"),
            ReceiptRow::plain("일    자", issued_on.format("%Y-%m-%d").to_string()),
            ReceiptRow::plain("공급받는자", &request.customer),
            ReceiptRow::plain("운행구간", &request.destination),
            ReceiptRow::plain("차    종", request.category.as_str()),
            ReceiptRow::blank(),
            ReceiptRow::section("[ 금액 산출 내역 ]"),
            ReceiptRow::plain("항    목", "금    액"),
            ReceiptRow::plain("-".repeat(20), "-".repeat(20)),
        ];

        rows.extend(
            result
                .line_items()
                .into_iter()
                .map(|item| ReceiptRow::plain(item.label, format_won(item.amount))),
        );

        rows.extend([
            ReceiptRow::blank(),
            ReceiptRow::plain("공급가액", format_won(result.subtotal)),
            ReceiptRow::plain("부 가 세", format_won(result.tax)),
            ReceiptRow::blank(),
            ReceiptRow::plain("총 합 계", format_won(result.total)),
            ReceiptRow::blank(),
            ReceiptRow::plain("위 금액을 정히 영수(청구)합니다.", ""),
            ReceiptRow::plain(format!("{} (인)", issuer.trade_name), ""),
        ]);

        Self { rows }
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

/// `20240315_1430_한빛상사_영수증.xlsx`; slashes are dropped from the name
pub fn receipt_file_name(now: NaiveDateTime, customer: &str) -> String {
    format!(
        "{}_{}_영수증.xlsx",
        now.format("%Y%m%d_%H%M"),
        customer.replace('/', "")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bora_domain::model::{QuoteOptions, VehicleCategory};
    use bora_domain::service::price;

    fn request() -> QuoteRequest {
        QuoteRequest {
            base_fare: 10_000,
            category: VehicleCategory::from("1톤탑/윙"),
            customer: "한빛상사".to_string(),
            destination: "군포/1톤윙".to_string(),
            options: QuoteOptions {
                round_trip: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_receipt_lines() {
        let req = request();
        let result = price(req.base_fare, &req.options, false);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let receipt = Receipt::build(&IssuerInfo::default(), &req, &result, date);

        assert_eq!(receipt.rows[0].kind, RowKind::Title);
        assert_eq!(receipt.value_of("일    자"), Some("2024-03-15"));
        assert_eq!(receipt.value_of("공급받는자"), Some("한빛상사"));
        assert_eq!(receipt.value_of("기본 운임"), Some("10,000"));
        assert_eq!(receipt.value_of("왕복 할증"), Some("7,000"));
        assert_eq!(receipt.value_of("대기료"), None);
        assert_eq!(receipt.value_of("공급가액"), Some("17,000"));
        assert_eq!(receipt.value_of("부 가 세"), Some("1,700"));
        assert_eq!(receipt.value_of("총 합 계"), Some("18,700"));
        assert_eq!(receipt.rows.last().unwrap().label, "보라물류 (인)");
    }

    #[test]
    fn test_receipt_file_name() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(
            receipt_file_name(now, "A/S 센터/군포"),
            "20240315_1430_AS 센터군포_영수증.xlsx"
        );
    }
}
