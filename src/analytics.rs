//! Pure aggregation pipeline behind the expense list and reports views.
//!
//! Everything here is synchronous and total: inputs are the in-memory
//! expense list (amounts already normalized at the model boundary) plus an
//! explicit `today`, so the same code runs unchanged in unit tests and in
//! the browser.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::model::Expense;

/// Trailing window used to scope the reports page. Unknown keys fall back
/// to `All` (no filtering).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimeWindow {
    Week,
    Month,
    Quarter,
    Year,
    All,
}

impl TimeWindow {
    pub const OPTIONS: [TimeWindow; 5] = [
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Quarter,
        TimeWindow::Year,
        TimeWindow::All,
    ];

    pub fn from_key(key: &str) -> Self {
        match key {
            "week" => TimeWindow::Week,
            "month" => TimeWindow::Month,
            "quarter" => TimeWindow::Quarter,
            "year" => TimeWindow::Year,
            _ => TimeWindow::All,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Quarter => "quarter",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Week => "Last 7 Days",
            TimeWindow::Month => "Last 30 Days",
            TimeWindow::Quarter => "Last 3 Months",
            TimeWindow::Year => "Last Year",
            TimeWindow::All => "All Time",
        }
    }

    /// Start of the window relative to the current calendar day, or `None`
    /// for `All`. Calendar-unit subtraction clamps at month end, so e.g.
    /// one month before Mar 31 is Feb 28/29.
    pub fn start(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeWindow::Week => today.checked_sub_days(Days::new(7)),
            TimeWindow::Month => today.checked_sub_months(Months::new(1)),
            TimeWindow::Quarter => today.checked_sub_months(Months::new(3)),
            TimeWindow::Year => today.checked_sub_months(Months::new(12)),
            TimeWindow::All => None,
        }
    }
}

/// Category-equality plus free-text filter. The search term matches the
/// description and category case-insensitively, and the stringified amount
/// as-is. Empty filter values select everything.
pub fn filter_expenses(expenses: &[Expense], category: &str, search: &str) -> Vec<Expense> {
    let term = search.trim().to_lowercase();
    let raw_term = search.trim();

    expenses
        .iter()
        .filter(|expense| {
            if !category.is_empty() && expense.category != category {
                return false;
            }
            if term.is_empty() {
                return true;
            }
            expense.description.to_lowercase().contains(&term)
                || expense.category.to_lowercase().contains(&term)
                || expense.amount.to_string().contains(raw_term)
        })
        .cloned()
        .collect()
}

/// Keeps records with `date >= window start`. Records with unparseable
/// dates are dropped whenever a window is active.
pub fn filter_by_window(expenses: &[Expense], window: TimeWindow, today: NaiveDate) -> Vec<Expense> {
    match window.start(today) {
        None => expenses.to_vec(),
        Some(start) => expenses
            .iter()
            .filter(|expense| matches!(expense.calendar_date(), Some(date) if date >= start))
            .cloned()
            .collect(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
}

/// Groups amounts by category, empty names collapsing into "Other". Output
/// order is first-encounter order; callers wanting a ranking sort
/// explicitly via [`top_categories`].
pub fn totals_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        let name = if expense.category.is_empty() {
            "Other"
        } else {
            expense.category.as_str()
        };
        match totals.iter_mut().find(|total| total.name == name) {
            Some(entry) => entry.value += expense.amount,
            None => totals.push(CategoryTotal {
                name: name.to_string(),
                value: expense.amount,
            }),
        }
    }

    totals
}

pub fn top_categories(totals: &[CategoryTotal], count: usize) -> Vec<CategoryTotal> {
    let mut ranked = totals.to_vec();
    ranked.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(count);
    ranked
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthBucket {
    pub label: String,
    pub total: f64,
}

/// Exactly six zero-initialized buckets for the six calendar months ending
/// at the current month, oldest first. Expenses outside the frame are
/// dropped from this view; the frame never moves with the global window.
pub fn monthly_totals(expenses: &[Expense], today: NaiveDate) -> Vec<MonthBucket> {
    let current_month = today.with_day(1).unwrap_or(today);
    let mut buckets: Vec<(NaiveDate, f64)> = (0..6)
        .rev()
        .filter_map(|back| current_month.checked_sub_months(Months::new(back)))
        .map(|month| (month, 0.0))
        .collect();

    for expense in expenses {
        if let Some(date) = expense.calendar_date() {
            let month = date.with_day(1).unwrap_or(date);
            if let Some(slot) = buckets.iter_mut().find(|(key, _)| *key == month) {
                slot.1 += expense.amount;
            }
        }
    }

    buckets
        .into_iter()
        .map(|(month, total)| MonthBucket {
            label: month.format("%b %Y").to_string(),
            total,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayBucket {
    pub label: String,
    pub total: f64,
}

/// Trailing 14 calendar days ending today, labeled `day/month`, oldest
/// first. Independent of the global window, same as the month frame.
pub fn daily_totals(expenses: &[Expense], today: NaiveDate) -> Vec<DayBucket> {
    let mut buckets: Vec<(NaiveDate, f64)> = (0..14)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| (day, 0.0))
        .collect();

    for expense in expenses {
        if let Some(date) = expense.calendar_date() {
            if let Some(slot) = buckets.iter_mut().find(|(key, _)| *key == date) {
                slot.1 += expense.amount;
            }
        }
    }

    buckets
        .into_iter()
        .map(|(day, total)| DayBucket {
            label: format!("{}/{}", day.day(), day.month()),
            total,
        })
        .collect()
}

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Clone, Debug, PartialEq)]
pub struct WeekdayBucket {
    pub name: &'static str,
    pub total: f64,
    pub count: usize,
    pub average: f64,
}

/// Seven fixed buckets Sunday through Saturday with sum, transaction count
/// and mean (0 when the bucket is empty).
pub fn weekday_totals(expenses: &[Expense]) -> Vec<WeekdayBucket> {
    let mut totals = [0.0f64; 7];
    let mut counts = [0usize; 7];

    for expense in expenses {
        if let Some(date) = expense.calendar_date() {
            let index = date.weekday().num_days_from_sunday() as usize;
            totals[index] += expense.amount;
            counts[index] += 1;
        }
    }

    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(index, name)| WeekdayBucket {
            name,
            total: totals[index],
            count: counts[index],
            average: if counts[index] == 0 {
                0.0
            } else {
                totals[index] / counts[index] as f64
            },
        })
        .collect()
}

/// The weekday with the largest total, ties broken by earliest weekday.
/// `None` when nothing was spent at all.
pub fn highest_spending_day(buckets: &[WeekdayBucket]) -> Option<&WeekdayBucket> {
    let mut top: Option<&WeekdayBucket> = None;
    for bucket in buckets.iter().filter(|bucket| bucket.total > 0.0) {
        if top.map_or(true, |best| bucket.total > best.total) {
            top = Some(bucket);
        }
    }
    top
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub average: f64,
    pub count: usize,
    pub top_category: CategoryTotal,
}

/// Summary scalars over a (windowed or filtered) list. Division by zero is
/// special-cased so an empty list reports 0, never NaN. The top category is
/// the argmax over category totals with first-encounter tie-breaking.
pub fn summarize(expenses: &[Expense]) -> Summary {
    let totals = totals_by_category(expenses);
    let total: f64 = expenses.iter().map(|expense| expense.amount).sum();
    let count = expenses.len();
    let average = if count == 0 { 0.0 } else { total / count as f64 };

    let mut top: Option<&CategoryTotal> = None;
    for candidate in &totals {
        if top.map_or(true, |best| candidate.value > best.value) {
            top = Some(candidate);
        }
    }
    let top_category = top.cloned().unwrap_or(CategoryTotal {
        name: "None".to_string(),
        value: 0.0,
    });

    Summary {
        total,
        average,
        count,
        top_category,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthOverMonth {
    pub current: f64,
    pub previous: f64,
    pub value: f64,
    pub percentage: f64,
    pub is_increase: bool,
}

/// Compares the latest month bucket with the one before it. Returns `None`
/// with fewer than two buckets (insufficient data). The percentage is 0
/// when the prior month total is 0.
pub fn month_over_month(months: &[MonthBucket]) -> Option<MonthOverMonth> {
    if months.len() < 2 {
        return None;
    }

    let current = months[months.len() - 1].total;
    let previous = months[months.len() - 2].total;
    let change = current - previous;

    Some(MonthOverMonth {
        current,
        previous,
        value: change.abs(),
        percentage: if previous > 0.0 {
            (change / previous * 100.0).abs()
        } else {
            0.0
        },
        is_increase: change > 0.0,
    })
}

/// 1-based page slice over the filtered list. Pages past the end yield an
/// empty slice rather than an error.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(items.len());
    items[start..end].to_vec()
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: f64, category: &str, date: &str) -> Expense {
        Expense {
            id: None,
            amount,
            description: format!("{category} purchase"),
            category: category.to_string(),
            date: date.to_string(),
        }
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(100.0, "Food & Dining", "2024-01-05"),
            expense(50.0, "Food & Dining", "2024-02-10"),
            expense(45.99, "Transportation", "2024-02-12"),
            expense(200.0, "Shopping", "2024-02-14"),
            expense(10.0, "", "2024-02-15"),
        ]
    }

    #[test]
    fn category_totals_partition_the_total() {
        let expenses = sample();
        let totals = totals_by_category(&expenses);

        let bucket_sum: f64 = totals.iter().map(|t| t.value).sum();
        let amount_sum: f64 = expenses.iter().map(|e| e.amount).sum();
        assert!((bucket_sum - amount_sum).abs() < 1e-9);
    }

    #[test]
    fn empty_category_lands_in_other() {
        let totals = totals_by_category(&sample());
        assert!(totals.iter().any(|t| t.name == "Other" && t.value == 10.0));
    }

    #[test]
    fn category_filter_collapses_to_one_bucket() {
        let filtered = filter_expenses(&sample(), "Food & Dining", "");
        let totals = totals_by_category(&filtered);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].name, "Food & Dining");
        assert_eq!(totals[0].value, 150.0);

        let none = filter_expenses(&sample(), "Healthcare", "");
        assert!(totals_by_category(&none).is_empty());
    }

    #[test]
    fn search_matches_description_case_insensitively() {
        let found = filter_expenses(&sample(), "", "SHOPPING");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "Shopping");
    }

    #[test]
    fn search_matches_stringified_amount() {
        let found = filter_expenses(&sample(), "", "45.99");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, 45.99);
    }

    #[test]
    fn empty_filters_select_everything() {
        assert_eq!(filter_expenses(&sample(), "", "").len(), sample().len());
    }

    #[test]
    fn unknown_window_key_defaults_to_all() {
        assert_eq!(TimeWindow::from_key("fortnight"), TimeWindow::All);
        assert_eq!(TimeWindow::from_key("week"), TimeWindow::Week);
    }

    #[test]
    fn month_window_clamps_at_month_end() {
        let start = TimeWindow::Month.start(day(2024, 3, 31)).unwrap();
        assert_eq!(start, day(2024, 2, 29));
    }

    #[test]
    fn window_drops_older_records() {
        let today = day(2024, 2, 15);
        let windowed = filter_by_window(&sample(), TimeWindow::Week, today);
        assert_eq!(windowed.len(), 4);

        let all = filter_by_window(&sample(), TimeWindow::All, today);
        assert_eq!(all.len(), sample().len());
    }

    #[test]
    fn monthly_totals_always_have_six_buckets_oldest_first() {
        let today = day(2024, 2, 15);
        let months = monthly_totals(&sample(), today);

        assert_eq!(months.len(), 6);
        assert_eq!(months[0].label, "Sep 2023");
        assert_eq!(months[5].label, "Feb 2024");
        assert_eq!(months[4].total, 100.0);
        assert!((months[5].total - 305.99).abs() < 1e-9);
    }

    #[test]
    fn monthly_totals_drop_expenses_outside_the_frame() {
        let today = day(2024, 2, 15);
        let mut expenses = sample();
        expenses.push(expense(999.0, "Travel", "2023-01-01"));

        let months = monthly_totals(&expenses, today);
        let frame_sum: f64 = months.iter().map(|m| m.total).sum();
        assert!((frame_sum - 405.99).abs() < 1e-9);
    }

    #[test]
    fn daily_totals_cover_the_trailing_fourteen_days() {
        let today = day(2024, 2, 15);
        let days = daily_totals(&sample(), today);

        assert_eq!(days.len(), 14);
        assert_eq!(days[0].label, "2/2");
        assert_eq!(days[13].label, "15/2");
        assert_eq!(days[13].total, 10.0);
        // 2024-01-05 is outside the 14-day frame
        let frame_sum: f64 = days.iter().map(|d| d.total).sum();
        assert!((frame_sum - 305.99).abs() < 1e-9);
    }

    #[test]
    fn weekday_counts_partition_the_list() {
        let buckets = weekday_totals(&sample());
        let count: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(count, sample().len());
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].name, "Sunday");
        assert_eq!(buckets[6].name, "Saturday");
    }

    #[test]
    fn weekday_average_is_zero_for_empty_buckets() {
        let buckets = weekday_totals(&[]);
        for bucket in buckets {
            assert_eq!(bucket.count, 0);
            assert_eq!(bucket.average, 0.0);
        }
    }

    #[test]
    fn summary_of_empty_list_has_no_nans() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.top_category.name, "None");
        assert_eq!(summary.top_category.value, 0.0);
    }

    #[test]
    fn summary_average_is_total_over_count() {
        let summary = summarize(&sample());
        assert_eq!(summary.count, 5);
        assert!((summary.average - summary.total / 5.0).abs() < 1e-9);
        assert_eq!(summary.top_category.name, "Shopping");
    }

    #[test]
    fn top_category_ties_break_on_first_encounter() {
        let expenses = vec![
            expense(50.0, "Food & Dining", "2024-02-10"),
            expense(50.0, "Shopping", "2024-02-11"),
        ];
        let summary = summarize(&expenses);
        assert_eq!(summary.top_category.name, "Food & Dining");
    }

    #[test]
    fn top_categories_sorts_descending_and_takes_five() {
        let expenses: Vec<Expense> = (1..=7)
            .map(|i| expense(i as f64, &format!("Category {i}"), "2024-02-10"))
            .collect();
        let ranked = top_categories(&totals_by_category(&expenses), 5);

        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].name, "Category 7");
        assert_eq!(ranked[4].name, "Category 3");
    }

    #[test]
    fn month_over_month_matches_the_feb_2024_scenario() {
        let expenses = vec![
            expense(100.0, "Food", "2024-01-05"),
            expense(50.0, "Food", "2024-02-10"),
        ];
        let totals = totals_by_category(&expenses);
        assert_eq!(totals, vec![CategoryTotal { name: "Food".to_string(), value: 150.0 }]);

        let months = monthly_totals(&expenses, day(2024, 2, 15));
        let change = month_over_month(&months).unwrap();
        assert_eq!(change.previous, 100.0);
        assert_eq!(change.current, 50.0);
        assert_eq!(change.value, 50.0);
        assert!(!change.is_increase);
        assert!((change.percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn month_over_month_percentage_is_zero_when_prior_is_zero() {
        let months = vec![
            MonthBucket { label: "Jan 2024".to_string(), total: 0.0 },
            MonthBucket { label: "Feb 2024".to_string(), total: 75.0 },
        ];
        let change = month_over_month(&months).unwrap();
        assert_eq!(change.percentage, 0.0);
        assert!(change.is_increase);
        assert_eq!(change.value, 75.0);
    }

    #[test]
    fn month_over_month_needs_two_buckets() {
        let months = vec![MonthBucket { label: "Feb 2024".to_string(), total: 75.0 }];
        assert!(month_over_month(&months).is_none());
    }

    #[test]
    fn pagination_concat_round_trips() {
        let items: Vec<i32> = (0..23).collect();
        let size = 8;
        let pages = page_count(items.len(), size);
        assert_eq!(pages, 3);

        let mut collected = Vec::new();
        for page in 1..=pages {
            collected.extend(paginate(&items, page, size));
        }
        assert_eq!(collected, items);

        assert_eq!(paginate(&items, pages, size).len(), 23 % size);
        assert_eq!(paginate(&items, pages + 1, size), Vec::<i32>::new());
    }

    #[test]
    fn pagination_of_divisible_list_has_full_last_page() {
        let items: Vec<i32> = (0..24).collect();
        assert_eq!(page_count(items.len(), 8), 3);
        assert_eq!(paginate(&items, 3, 8).len(), 8);
    }

    #[test]
    fn highest_spending_day_ignores_empty_weeks() {
        assert!(highest_spending_day(&weekday_totals(&[])).is_none());

        let buckets = weekday_totals(&sample());
        let top = highest_spending_day(&buckets).unwrap();
        assert!(top.total > 0.0);
    }
}
