//! Vehicle-type classification of free-text destination strings
//!
//! Dispatch clerks type the vehicle into the destination column in whatever
//! shape they like (`군포/1톤윙`, `5톤 축 리프트`, `/오 급송`). The cascade
//! below turns that into one of a fixed set of category labels:
//!
//! 1. blank → deletion marker
//! 2. small vehicles (다마스, 라보, 오토바이) win outright
//! 3. tonnage bucket, heavy tonnage, box count, or unclassified
//! 4. option flags over the whole normalized string
//! 5. label assembly: base, 광폭, /무진동, then 리프트 or 탑/윙
//!
//! Each stage is an ordered table; the first matching row wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::category::{DAMAS, LABO, MOTORCYCLE};
use crate::model::VehicleCategory;

/// Substring test against the normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Contains(&'static str),
    StartsWith(&'static str),
}

impl Pattern {
    fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Contains(p) => text.contains(p),
            Pattern::StartsWith(p) => text.starts_with(p),
        }
    }
}

fn any_match(patterns: &[Pattern], text: &str) -> bool {
    patterns.iter().any(|p| p.matches(text))
}

/// Small vehicles that skip tonnage and option handling
pub struct SmallVehicleRule {
    pub patterns: &'static [Pattern],
    pub label: &'static str,
}

pub const SMALL_VEHICLE_RULES: &[SmallVehicleRule] = &[
    SmallVehicleRule {
        patterns: &[Pattern::Contains("/다"), Pattern::Contains("다마")],
        label: DAMAS,
    },
    SmallVehicleRule {
        patterns: &[Pattern::Contains("/라"), Pattern::Contains("라보")],
        label: LABO,
    },
    SmallVehicleRule {
        patterns: &[Pattern::Contains("/오"), Pattern::Contains("오토")],
        label: MOTORCYCLE,
    },
];

/// Fixed tonnage buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tonnage {
    TwoAndHalf,
    ThreeAndHalf,
    Five,
    OnePointFour,
    One,
}

impl Tonnage {
    pub fn label(&self) -> &'static str {
        match self {
            Tonnage::TwoAndHalf => "2.5톤",
            Tonnage::ThreeAndHalf => "3.5톤",
            Tonnage::Five => "5톤",
            Tonnage::OnePointFour => "1.4톤",
            Tonnage::One => "1톤",
        }
    }

    /// Light trucks never carry the wide-body suffix
    fn is_wide_exempt(&self) -> bool {
        matches!(self, Tonnage::One | Tonnage::OnePointFour | Tonnage::TwoAndHalf)
    }
}

pub struct TonnageRule {
    pub patterns: &'static [Pattern],
    pub tonnage: Tonnage,
}

pub const TONNAGE_RULES: &[TonnageRule] = &[
    TonnageRule {
        patterns: &[
            Pattern::Contains("2.5"),
            Pattern::Contains("25톤"),
            Pattern::StartsWith("2.5"),
        ],
        tonnage: Tonnage::TwoAndHalf,
    },
    TonnageRule {
        patterns: &[Pattern::Contains("3.5"), Pattern::Contains("35")],
        tonnage: Tonnage::ThreeAndHalf,
    },
    TonnageRule {
        patterns: &[
            Pattern::Contains("5톤"),
            Pattern::Contains("5T"),
            Pattern::Contains("5축"),
            Pattern::Contains("5톤축"),
        ],
        tonnage: Tonnage::Five,
    },
    TonnageRule {
        patterns: &[
            Pattern::Contains("1.4"),
            Pattern::Contains("1.3"),
            Pattern::Contains("1.5"),
        ],
        tonnage: Tonnage::OnePointFour,
    },
    TonnageRule {
        patterns: &[
            Pattern::Contains("1톤"),
            Pattern::Contains("1T"),
            Pattern::Contains("1카"),
            Pattern::Contains("1탑"),
            Pattern::Contains("1윙"),
        ],
        tonnage: Tonnage::One,
    },
];

/// Prefixes that mark a heavy truck when a `톤` marker is also present
const HEAVY_MARKERS: &[&str] = &["11", "16", "25"];
const TON_MARKER: &str = "톤";
const HEAVY_FALLBACK: &str = "대형";

static HEAVY_TONNAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)톤").expect("static regex"));
static BOX_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)P").expect("static regex"));

/// Resolved size stage of the cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeClass {
    Bucket(Tonnage),
    /// `16톤`, `25톤`, ... or `대형` when no number precedes the marker
    Heavy(String),
}

impl SizeClass {
    fn label(&self) -> &str {
        match self {
            SizeClass::Bucket(t) => t.label(),
            SizeClass::Heavy(label) => label,
        }
    }

    fn is_wide_exempt(&self) -> bool {
        matches!(self, SizeClass::Bucket(t) if t.is_wide_exempt())
    }
}

/// Body and equipment options detected anywhere in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleOption {
    Lift,
    WingTop,
    WideBody,
    Axle,
    NoVibration,
}

pub struct OptionRule {
    pub option: VehicleOption,
    pub patterns: &'static [Pattern],
}

pub const OPTION_RULES: &[OptionRule] = &[
    OptionRule {
        option: VehicleOption::Lift,
        patterns: &[
            Pattern::Contains("리프트"),
            Pattern::Contains("리프"),
            Pattern::Contains("리"),
            Pattern::Contains("LIFT"),
        ],
    },
    OptionRule {
        option: VehicleOption::WingTop,
        patterns: &[
            Pattern::Contains("윙"),
            Pattern::Contains("탑"),
            Pattern::Contains("WING"),
            Pattern::Contains("TOP"),
            Pattern::Contains("캅"),
        ],
    },
    OptionRule {
        option: VehicleOption::WideBody,
        patterns: &[Pattern::Contains("광폭"), Pattern::Contains("광")],
    },
    OptionRule {
        option: VehicleOption::Axle,
        patterns: &[Pattern::Contains("축")],
    },
    OptionRule {
        option: VehicleOption::NoVibration,
        patterns: &[Pattern::Contains("무진동")],
    },
];

const FIVE_TON_AXLE: &str = "5톤축차";
const WIDE_SUFFIX: &str = "광폭";
const NO_VIBRATION_SUFFIX: &str = "/무진동";
const LIFT_SUFFIX: &str = "리프트";
const WING_TOP_SUFFIX: &str = "탑/윙";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionFlags {
    pub lift: bool,
    pub wing_top: bool,
    pub wide_body: bool,
    pub axle: bool,
    pub no_vibration: bool,
}

impl OptionFlags {
    fn set(&mut self, option: VehicleOption) {
        match option {
            VehicleOption::Lift => self.lift = true,
            VehicleOption::WingTop => self.wing_top = true,
            VehicleOption::WideBody => self.wide_body = true,
            VehicleOption::Axle => self.axle = true,
            VehicleOption::NoVibration => self.no_vibration = true,
        }
    }
}

/// Strip every whitespace character and uppercase
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

pub fn match_small_vehicle(normalized: &str) -> Option<&'static str> {
    SMALL_VEHICLE_RULES
        .iter()
        .find(|rule| any_match(rule.patterns, normalized))
        .map(|rule| rule.label)
}

pub fn match_size(normalized: &str) -> Option<SizeClass> {
    if let Some(rule) = TONNAGE_RULES
        .iter()
        .find(|rule| any_match(rule.patterns, normalized))
    {
        return Some(SizeClass::Bucket(rule.tonnage));
    }

    let heavy = HEAVY_MARKERS.iter().any(|m| normalized.contains(m))
        && normalized.contains(TON_MARKER);
    if heavy {
        let label = HEAVY_TONNAGE_RE
            .find(normalized)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| HEAVY_FALLBACK.to_string());
        return Some(SizeClass::Heavy(label));
    }

    None
}

/// `3P`, `12P`, ... for box-count shipments
pub fn match_box_count(normalized: &str) -> Option<String> {
    BOX_COUNT_RE
        .captures(normalized)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{}P", m.as_str()))
}

pub fn detect_options(normalized: &str) -> OptionFlags {
    let mut flags = OptionFlags::default();
    for rule in OPTION_RULES {
        if any_match(rule.patterns, normalized) {
            flags.set(rule.option);
        }
    }
    flags
}

fn assemble(size: &SizeClass, flags: OptionFlags) -> String {
    let axle_variant = size == &SizeClass::Bucket(Tonnage::Five) && flags.axle;
    let mut label = if axle_variant {
        FIVE_TON_AXLE.to_string()
    } else {
        size.label().to_string()
    };

    if flags.wide_body && !size.is_wide_exempt() && !axle_variant {
        label.push_str(WIDE_SUFFIX);
    }
    if flags.no_vibration {
        label.push_str(NO_VIBRATION_SUFFIX);
    }
    if flags.lift {
        label.push_str(LIFT_SUFFIX);
    } else if flags.wing_top {
        label.push_str(WING_TOP_SUFFIX);
    }
    label
}

/// Classify free text into a vehicle category. Total: every input yields a
/// label, blank input yields the deletion marker.
pub fn classify(text: &str) -> VehicleCategory {
    if text.trim().is_empty() {
        return VehicleCategory::deletion_marker();
    }
    let normalized = normalize(text);

    if let Some(label) = match_small_vehicle(&normalized) {
        return VehicleCategory::new(label);
    }

    let Some(size) = match_size(&normalized) else {
        return match match_box_count(&normalized) {
            Some(label) => VehicleCategory::new(label),
            None => VehicleCategory::unclassified(),
        };
    };

    let flags = detect_options(&normalized);
    VehicleCategory::new(assemble(&size, flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> String {
        classify(text).as_str().to_string()
    }

    #[test]
    fn test_blank_is_deletion_marker() {
        assert!(classify("").is_deletion_marker());
        assert!(classify("   ").is_deletion_marker());
        assert!(classify("\t\n").is_deletion_marker());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" 1 톤 wing "), "1톤WING");
    }

    #[test]
    fn test_small_vehicle_override() {
        assert_eq!(label("오토바이"), "오토바이");
        assert_eq!(label("군포/오 5톤리프트"), "오토바이");
        assert_eq!(label("다마스 급송"), "다마스");
        assert_eq!(label("안양/다"), "다마스");
        assert_eq!(label("라보"), "라보");
    }

    #[test]
    fn test_small_vehicle_rule_order() {
        // 다마스 is checked before 오토바이
        assert_eq!(label("다마스/오"), "다마스");
    }

    #[test]
    fn test_one_ton_wing() {
        assert_eq!(label("1톤윙"), "1톤탑/윙");
        assert_eq!(label("1t top"), "1톤탑/윙");
    }

    #[test]
    fn test_five_ton_axle() {
        assert_eq!(label("5톤축"), "5톤축차");
        assert_eq!(label("5톤축광폭"), "5톤축차");
    }

    #[test]
    fn test_five_ton_wide() {
        assert_eq!(label("5톤광폭"), "5톤광폭");
        assert_eq!(label("5톤광폭윙"), "5톤광폭탑/윙");
    }

    #[test]
    fn test_wide_exempt_light_trucks() {
        assert_eq!(label("2.5톤광폭리프트"), "2.5톤리프트");
        assert_eq!(label("1.4톤광폭"), "1.4톤");
        assert_eq!(label("1톤광"), "1톤");
        assert_eq!(label("3.5광폭"), "3.5톤광폭");
    }

    #[test]
    fn test_lift_wins_over_wing() {
        assert_eq!(label("3.5톤윙리프트"), "3.5톤리프트");
    }

    #[test]
    fn test_no_vibration_suffix_order() {
        assert_eq!(label("5톤광폭무진동윙"), "5톤광폭/무진동탑/윙");
        assert_eq!(label("5톤축무진동"), "5톤축차/무진동");
    }

    #[test]
    fn test_tonnage_rule_order() {
        assert_eq!(label("2.5톤"), "2.5톤");
        assert_eq!(label("25톤"), "2.5톤");
        assert_eq!(label("35"), "3.5톤");
        assert_eq!(label("5T"), "5톤");
        assert_eq!(label("1.3"), "1.4톤");
        assert_eq!(label("1카"), "1톤");
    }

    #[test]
    fn test_heavy_tonnage() {
        assert_eq!(label("16톤"), "16톤");
        assert_eq!(label("16톤윙"), "16톤탑/윙");
        assert_eq!(label("16톤광폭"), "16톤광폭");
    }

    #[test]
    fn test_heavy_without_number_before_marker() {
        assert_eq!(label("톤16"), "대형");
    }

    #[test]
    fn test_eleven_ton_falls_into_one_ton_bucket() {
        // "11톤" contains "1톤", which the one-ton rule sees first
        assert_eq!(label("11톤"), "1톤");
    }

    #[test]
    fn test_box_count() {
        assert_eq!(label("3P"), "3P");
        assert_eq!(label("서울 12p"), "12P");
    }

    #[test]
    fn test_unclassified() {
        assert!(classify("서울 강남구").is_unclassified());
    }

    #[test]
    fn test_options_scan_whole_string() {
        // The 리 in 구리 reads as a lift keyword
        assert_eq!(label("구리 1톤"), "1톤리프트");
    }

    #[test]
    fn test_detect_options() {
        let flags = detect_options("5톤축광폭무진동LIFT");
        assert!(flags.lift);
        assert!(flags.axle);
        assert!(flags.wide_body);
        assert!(flags.no_vibration);
        assert!(!flags.wing_top);
    }
}
