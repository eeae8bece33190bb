//! Compiled-in winner list for a draw whose published file is unusable.
//!
//! The first page of the 97th Rs. 750 draw (15-01-2024) is not linked from the
//! listing page in a readable form, so its winners are carried here instead.

use crate::domain::{BondNumber, BondType, WinningSet};

const DRAW_97_ID: &str = "First-Page-97th-draw-of-750-15-01-2024-1";
const DRAW_97_LABEL: &str = "Hardcoded Result (750 - Jan 2024)";

const DRAW_97_NUMBERS: [&str; 105] = [
    "125416", "164214", "344409", "081307", "149739", "320971", "075134",
    "259284", "181057", "298788", "290198", "325272", "164179", "291576",
    "071092", "085129", "339949", "106486", "142196", "327095", "051537",
    "330171", "056813", "339413", "251835", "331332", "061266", "147676",
    "222323", "317741", "172771", "080566", "343960", "104099", "206200",
    "058700", "263650", "313233", "147230", "230451", "052487", "051104",
    "297840", "320140", "297988", "198229", "283321", "205564", "158870",
    "118992", "084635", "244179", "261671", "331327", "163223", "184215",
    "148108", "160317", "254003", "162721", "260788", "288201", "088041",
    "162282", "327770", "120723", "120771", "221348", "081567", "153771",
    "341914", "142030", "129208", "159648", "069439", "329574", "336335",
    "060622", "146420", "343781", "221029", "167164", "265778", "060258",
    "150914", "228881", "064402", "095738", "295905", "288610", "068061",
    "105319", "341362", "149980", "155281", "329070", "102570", "336764",
    "073203", "290719", "287409", "117180", "153365", "329939", "203920",
];

/// A static winning set that the locator appends for one bond type.
#[derive(Debug, Clone)]
pub struct FallbackDataset {
    pub bond_type: BondType,
    /// Identifier placed in the locator's file list.
    pub id: String,
    /// Label the matches are reported under.
    pub label: String,
    pub numbers: WinningSet,
}

impl FallbackDataset {
    /// The Rs. 750 January 2024 draw.
    pub fn rs750_jan_2024() -> Self {
        Self {
            bond_type: BondType::Rs750,
            id: DRAW_97_ID.to_string(),
            label: DRAW_97_LABEL.to_string(),
            numbers: DRAW_97_NUMBERS.iter().filter_map(|n| BondNumber::parse(n)).collect(),
        }
    }

    pub fn applies_to(&self, bond_type: BondType) -> bool {
        self.bond_type == bond_type
    }
}
