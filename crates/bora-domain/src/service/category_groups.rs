//! Operator-facing grouping of category labels for the selection list

use serde::Serialize;

use crate::model::category::{COMBINED_LOAD, MIXED_CARGO};
use crate::model::VehicleCategory;

struct GroupDef {
    name: &'static str,
    keywords: &'static [&'static str],
    /// Labels containing any of these are left out of the group
    excluded: &'static [&'static str],
}

const GROUPS: &[GroupDef] = &[
    GroupDef {
        name: "퀵서비스",
        keywords: &["오토바이", "다마스", "라보"],
        excluded: &[],
    },
    GroupDef {
        name: "혼적/합짐",
        keywords: &[MIXED_CARGO, COMBINED_LOAD],
        excluded: &[],
    },
    GroupDef {
        name: "중형운송",
        keywords: &["1톤", "1.4톤"],
        excluded: &["2.5", "3.5", "5"],
    },
    GroupDef {
        name: "대형운송",
        keywords: &["2.5톤", "3.5톤", "5톤", "11톤", "16톤", "18톤", "25톤"],
        excluded: &[],
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub name: &'static str,
    pub categories: Vec<VehicleCategory>,
}

impl CategoryGroup {
    pub fn is_mixed_cargo(&self) -> bool {
        self.categories.iter().any(|c| c.is_mixed_cargo())
    }
}

fn sort_rank(label: &str) -> u8 {
    if label.contains("2.5") {
        1
    } else if label.contains("3.5") {
        2
    } else if label.contains("5톤") {
        3
    } else {
        99
    }
}

/// Group the distinct labels present in the data. `혼적` and `합짐` are always
/// offered even when no row carries them, so keyword matches stay reachable.
pub fn group_categories<'a, I>(labels: I) -> Vec<CategoryGroup>
where
    I: IntoIterator<Item = &'a VehicleCategory>,
{
    let mut distinct: Vec<VehicleCategory> = Vec::new();
    for label in labels {
        if !distinct.contains(label) {
            distinct.push(label.clone());
        }
    }
    for forced in [MIXED_CARGO, COMBINED_LOAD] {
        let forced = VehicleCategory::from(forced);
        if !distinct.contains(&forced) {
            distinct.push(forced);
        }
    }

    GROUPS
        .iter()
        .map(|def| {
            let mut categories: Vec<VehicleCategory> = distinct
                .iter()
                .filter(|c| def.keywords.iter().any(|k| c.as_str().contains(k)))
                .filter(|c| !def.excluded.iter().any(|x| c.as_str().contains(x)))
                .cloned()
                .collect();
            categories.sort_by_key(|c| sort_rank(c.as_str()));
            CategoryGroup {
                name: def.name,
                categories,
            }
        })
        .collect()
}
