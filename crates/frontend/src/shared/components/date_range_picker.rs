use chrono::{Datelike, Duration, NaiveDate};
use leptos::prelude::*;
use thaw::*;

/// First and last day of the month containing `date`
pub fn month_of(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
    let next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)?
    };
    Some((start, next - Duration::days(1)))
}

/// DateRangePicker - два поля дат и кнопки быстрого выбора
///
/// Inputs are limited to `[min, max]` of the loaded data. "All" resets to the
/// full range, "-1M" steps back one month from the current start date,
/// "Last" selects the latest month present in the data.
#[component]
pub fn DateRangePicker(
    /// Значение даты "от"
    #[prop(into)]
    date_from: Signal<Option<NaiveDate>>,

    /// Значение даты "до"
    #[prop(into)]
    date_to: Signal<Option<NaiveDate>>,

    /// Observed bounds of the dataset
    #[prop(into)]
    min: Signal<Option<NaiveDate>>,
    #[prop(into)]
    max: Signal<Option<NaiveDate>>,

    /// Callback при изменении диапазона дат (from, to)
    on_change: Callback<(NaiveDate, NaiveDate)>,

    #[prop(optional)] label: Option<String>,
) -> impl IntoView {
    let fmt = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();

    let on_from_input = move |value: String| {
        if let (Ok(from), Some(to)) = (
            NaiveDate::parse_from_str(&value, "%Y-%m-%d"),
            date_to.get_untracked(),
        ) {
            on_change.run((from, to));
        }
    };

    let on_to_input = move |value: String| {
        if let (Some(from), Ok(to)) = (
            date_from.get_untracked(),
            NaiveDate::parse_from_str(&value, "%Y-%m-%d"),
        ) {
            on_change.run((from, to));
        }
    };

    let on_all = move |_| {
        if let (Some(from), Some(to)) = (min.get_untracked(), max.get_untracked()) {
            on_change.run((from, to));
        }
    };

    let on_previous_month = move |_| {
        let previous = date_from
            .get_untracked()
            .and_then(|from| from.with_day(1))
            .map(|first| first - Duration::days(1))
            .and_then(month_of);
        if let Some(range) = previous {
            on_change.run(range);
        }
    };

    let on_last_month = move |_| {
        if let Some(range) = max.get_untracked().and_then(month_of) {
            on_change.run(range);
        }
    };

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! { <Label>{l}</Label> })}

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || fmt(date_from.get())
                    min=move || fmt(min.get())
                    max=move || fmt(max.get())
                    on:change=move |ev| on_from_input(event_target_value(&ev))
                />

                <div>"—"</div>

                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || fmt(date_to.get())
                    min=move || fmt(min.get())
                    max=move || fmt(max.get())
                    on:change=move |ev| on_to_input(event_target_value(&ev))
                />

                <ButtonGroup>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_previous_month
                    >
                        "-1M"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_last_month
                    >
                        "Last"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_all
                    >
                        "All"
                    </Button>
                </ButtonGroup>
            </Flex>
        </Flex>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_of() {
        assert_eq!(month_of(date(2018, 2, 14)), Some((date(2018, 2, 1), date(2018, 2, 28))));
        assert_eq!(month_of(date(2016, 2, 1)), Some((date(2016, 2, 1), date(2016, 2, 29))));
        assert_eq!(month_of(date(2017, 12, 31)), Some((date(2017, 12, 1), date(2017, 12, 31))));
    }
}
