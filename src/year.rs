use crate::cli::CommonArgs;
use crate::error::{ContribError, Result};
use chrono::{Datelike, Local};
use console::style;
use serde::Serialize;

/// Number of selectable years, ending at the baseline year.
pub const YEARS_RANGE: i32 = 4;

/// Lower bound passed to the query as `from`: midnight on January 1st, local time, no offset.
pub fn from_param(year: i32) -> String {
    format!("{year:04}-01-01T00:00:00")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearFilter {
    baseline: i32,
    selected: i32,
}

impl YearFilter {
    pub fn new(baseline: i32) -> Self {
        Self { baseline, selected: baseline }
    }

    pub fn current() -> Self {
        Self::new(Local::now().year())
    }

    pub fn baseline(&self) -> i32 {
        self.baseline
    }

    pub fn selected(&self) -> i32 {
        self.selected
    }

    pub fn selectable_years(&self) -> Vec<i32> {
        (0..YEARS_RANGE)
            .map(|i| self.baseline - YEARS_RANGE + i + 1)
            .collect()
    }

    pub fn first(&self) -> i32 {
        self.baseline - YEARS_RANGE + 1
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first()..=self.baseline).contains(&year)
    }

    pub fn selected_index(&self) -> usize {
        (self.selected - self.first()) as usize
    }

    /// Returns whether the selection changed.
    pub fn select(&mut self, year: i32) -> Result<bool> {
        if !self.contains(year) {
            return Err(ContribError::InvalidYear {
                year,
                first: self.first(),
                last: self.baseline,
            });
        }
        let changed = self.selected != year;
        self.selected = year;
        Ok(changed)
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        match self.selectable_years().get(index) {
            Some(&year) => self.select(year).unwrap_or(false),
            None => false,
        }
    }

    pub fn next(&mut self) -> bool {
        if self.selected < self.baseline {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.selected > self.first() {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    pub fn from_param(&self) -> String {
        from_param(self.selected)
    }
}

/// Build the filter for the current calendar year and apply `--year` if given.
pub fn year_filter(common: &CommonArgs) -> Result<YearFilter> {
    let mut filter = YearFilter::current();
    if let Some(year) = common.year {
        filter.select(year)?;
    }
    Ok(filter)
}

#[derive(Serialize)]
struct YearEntry {
    year: i32,
    from: String,
    selected: bool,
}

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let filter = year_filter(&common)?;
    let entries: Vec<YearEntry> = filter
        .selectable_years()
        .into_iter()
        .map(|year| YearEntry {
            year,
            from: from_param(year),
            selected: year == filter.selected(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}", style("Selectable years").bold());
    for entry in &entries {
        let marker = if entry.selected { "◄" } else { "" };
        println!(
            "  {}  from={} {}",
            style(entry.year).cyan(),
            style(&entry.from).dim(),
            style(marker).yellow()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_param_is_start_of_year() {
        assert_eq!(from_param(2023), "2023-01-01T00:00:00");
        assert_eq!(YearFilter::new(2024).from_param(), "2024-01-01T00:00:00");
    }

    #[test]
    fn four_contiguous_years_ending_at_baseline() {
        let filter = YearFilter::new(2025);
        assert_eq!(filter.selectable_years(), vec![2022, 2023, 2024, 2025]);
        assert_eq!(filter.selected(), 2025);
        assert_eq!(filter.selected_index(), 3);
    }

    #[test]
    fn current_ends_at_this_year() {
        let filter = YearFilter::current();
        let years = filter.selectable_years();
        assert_eq!(years.len(), YEARS_RANGE as usize);
        assert_eq!(*years.last().unwrap(), Local::now().year());
        assert!(years.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn selection_is_clamped_to_range() {
        let mut filter = YearFilter::new(2025);
        assert!(!filter.next());
        assert!(filter.previous());
        assert_eq!(filter.selected(), 2024);
        assert!(filter.select_index(0));
        assert_eq!(filter.selected(), 2022);
        assert!(!filter.previous());
        assert!(!filter.select_index(9));
        assert!(matches!(
            filter.select(2019),
            Err(ContribError::InvalidYear { year: 2019, first: 2022, last: 2025 })
        ));
        assert_eq!(filter.select(2022).unwrap(), false);
    }
}
