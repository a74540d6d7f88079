//! Reference macronutrient distribution
//!
//! The carbohydrate / protein / fat split shown next to the daily calorie reminder.

use serde::Serialize;

/// Energy density in kcal per gram
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Relative weights of the three macronutrients (not necessarily summing to 100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroDistribution {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

/// Distribution normalized to percent of total energy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroPercentages {
    pub carbs_percent: f64,
    pub protein_percent: f64,
    pub fat_percent: f64,
}

/// Gram targets for a daily calorie budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroGrams {
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
}

impl MacroDistribution {
    /// The fixed 50 / 20 / 10 split
    pub fn reference() -> Self {
        Self {
            carbs: 50.0,
            protein: 20.0,
            fat: 10.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.carbs + self.protein + self.fat
    }

    /// All zeros when the weights sum to zero
    pub fn percentages(&self) -> MacroPercentages {
        let total = self.total();
        if total <= 0.0 {
            return MacroPercentages {
                carbs_percent: 0.0,
                protein_percent: 0.0,
                fat_percent: 0.0,
            };
        }
        MacroPercentages {
            carbs_percent: self.carbs / total * 100.0,
            protein_percent: self.protein / total * 100.0,
            fat_percent: self.fat / total * 100.0,
        }
    }

    /// Split `kcal` by energy share and convert each part to grams
    pub fn grams_for(&self, kcal: f64) -> MacroGrams {
        let pct = self.percentages();
        MacroGrams {
            carbs_g: kcal * pct.carbs_percent / 100.0 / KCAL_PER_G_CARBS,
            protein_g: kcal * pct.protein_percent / 100.0 / KCAL_PER_G_PROTEIN,
            fat_g: kcal * pct.fat_percent / 100.0 / KCAL_PER_G_FAT,
        }
    }
}

impl Default for MacroDistribution {
    fn default() -> Self {
        Self::reference()
    }
}
