//! Normalized vehicle-type labels (차종)

use serde::{Deserialize, Serialize};

/// Rows carrying this label are excluded from the consolidated dataset
pub const DELETION_MARKER: &str = "삭제대상";
/// No tonnage, box count or small-vehicle marker was recognised
pub const UNCLASSIFIED: &str = "미분류";

pub const DAMAS: &str = "다마스";
pub const LABO: &str = "라보";
pub const MOTORCYCLE: &str = "오토바이";

/// Shared-load shipment (혼적)
pub const MIXED_CARGO: &str = "혼적";
/// Combined-load shipment (합짐)
pub const COMBINED_LOAD: &str = "합짐";

/// Vehicle category label assigned once at ingest.
///
/// The label is kept as the business writes it (e.g. `5톤광폭/무진동리프트`)
/// because operators filter and print it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleCategory(String);

impl VehicleCategory {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn deletion_marker() -> Self {
        Self::new(DELETION_MARKER)
    }

    pub fn unclassified() -> Self {
        Self::new(UNCLASSIFIED)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_deletion_marker(&self) -> bool {
        self.0 == DELETION_MARKER
    }

    pub fn is_unclassified(&self) -> bool {
        self.0 == UNCLASSIFIED
    }

    /// Box-count labels such as `3P`
    pub fn is_box_count(&self) -> bool {
        self.0.contains('P')
    }

    /// Motorcycle-class shipments unlock the urgency and rack surcharges
    pub fn is_motorcycle(&self) -> bool {
        self.0.contains(MOTORCYCLE)
    }

    pub fn is_mixed_cargo(&self) -> bool {
        contains_mixed_cargo_keyword(&self.0)
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleCategory {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for VehicleCategory {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// True when `text` mentions a shared or combined load
pub fn contains_mixed_cargo_keyword(text: &str) -> bool {
    text.contains(MIXED_CARGO) || text.contains(COMBINED_LOAD)
}
