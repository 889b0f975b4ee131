use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::VehicleCategory;

/// One row of transport history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub date: NaiveDate,                     // 접수일자
    pub customer_name: String,               // 고객성명
    pub destination: String,                 // 도 착 지
    pub vehicle_category: VehicleCategory,   // 차종_최종
    pub fare: u64,                           // 배달운임
}

impl ShipmentRecord {
    pub fn is_motorcycle(&self) -> bool {
        self.vehicle_category.is_motorcycle()
    }

    /// Date in the ISO form used for display and range comparison
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
