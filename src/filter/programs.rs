use serde::{Deserialize, Serialize};

use super::engine::{filter_items, DerivedView, QueryState, Selection};
use crate::content::models::{Facet, Format, Level, Program, ProgramCategory};

/// Filters only the programs page offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramFilters {
    pub level: Selection<Level>,
    pub format: Selection<Format>,
}

impl ProgramFilters {
    pub fn admits(&self, program: &Program) -> bool {
        self.level.admits(program.level) && self.format.admits(program.format)
    }

    pub fn is_default(&self) -> bool {
        self.level.is_all() && self.format.is_all()
    }
}

/// Ordering choices on the programs page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgramSort {
    /// Featured programs first, otherwise source order.
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    DurationShortest,
}

impl ProgramSort {
    pub const ALL: [ProgramSort; 4] = [
        ProgramSort::Featured,
        ProgramSort::PriceLowHigh,
        ProgramSort::PriceHighLow,
        ProgramSort::DurationShortest,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ProgramSort::Featured => "featured",
            ProgramSort::PriceLowHigh => "price-low-high",
            ProgramSort::PriceHighLow => "price-high-low",
            ProgramSort::DurationShortest => "duration-shortest",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            ProgramSort::Featured => "programs.sort.featured",
            ProgramSort::PriceLowHigh => "programs.sort.price-low-high",
            ProgramSort::PriceHighLow => "programs.sort.price-high-low",
            ProgramSort::DurationShortest => "programs.sort.duration-shortest",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Some(ProgramSort::default());
        }
        Self::ALL.into_iter().find(|s| s.key().eq_ignore_ascii_case(key))
    }

    /// Stable sort of `programs` in this order.
    pub fn apply(&self, programs: &mut [&Program]) {
        match self {
            ProgramSort::Featured => programs.sort_by_key(|p| !p.featured),
            ProgramSort::PriceLowHigh => programs.sort_by_key(|p| p.price_usd),
            ProgramSort::PriceHighLow => {
                programs.sort_by_key(|p| std::cmp::Reverse(p.price_usd))
            }
            ProgramSort::DurationShortest => programs.sort_by_key(|p| p.duration_weeks),
        }
    }
}

/// Programs matching the shared query and the page's own filters, sorted.
pub fn filter_programs<'a>(
    programs: &'a [Program],
    query: &QueryState<ProgramCategory>,
    filters: &ProgramFilters,
    sort: ProgramSort,
) -> DerivedView<'a, Program> {
    let mut items: Vec<&Program> = filter_items(programs, query)
        .into_iter()
        .filter(|p| filters.admits(p))
        .collect();
    sort.apply(&mut items);
    DerivedView {
        items,
        total: programs.len(),
    }
}

/// Levels offered by at least one program, in display order.
pub fn available_levels(programs: &[Program]) -> Vec<Level> {
    Level::ALL
        .iter()
        .copied()
        .filter(|l| programs.iter().any(|p| p.level == *l))
        .collect()
}
