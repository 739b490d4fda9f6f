use leptos::prelude::*;

/// Number of pages needed for `total` rows
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// "1–50 of 1 234" style caption for the current page
pub fn rows_caption(page: usize, page_size: usize, total: usize) -> String {
    if total == 0 {
        return "0 of 0".to_string();
    }
    let first = (page * page_size + 1).min(total);
    let last = ((page + 1) * page_size).min(total);
    format!("{}–{} of {}", first, last, total)
}

/// Листание страниц таблицы детальных данных
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed)
    #[prop(into)]
    current_page: Signal<usize>,
    #[prop(into)] total_count: Signal<usize>,
    page_size: usize,
    on_page_change: Callback<usize>,
) -> impl IntoView {
    let last_page = Memo::new(move |_| page_count(total_count.get(), page_size).saturating_sub(1));
    let at_start = move || current_page.get() == 0;
    let at_end = move || current_page.get() >= last_page.get();

    let go = move |target: usize| {
        let target = target.min(last_page.get_untracked());
        if target != current_page.get_untracked() {
            on_page_change.run(target);
        }
    };

    view! {
        <div class="pagination-controls">
            <button class="pagination-btn" title="First page" disabled=at_start on:click=move |_| go(0)>
                "«"
            </button>
            <button
                class="pagination-btn"
                title="Previous page"
                disabled=at_start
                on:click=move |_| go(current_page.get_untracked().saturating_sub(1))
            >
                "‹"
            </button>
            <span class="pagination-info">
                {move || rows_caption(current_page.get(), page_size, total_count.get())}
            </span>
            <button
                class="pagination-btn"
                title="Next page"
                disabled=at_end
                on:click=move |_| go(current_page.get_untracked() + 1)
            >
                "›"
            </button>
            <button
                class="pagination-btn"
                title="Last page"
                disabled=at_end
                on:click=move |_| go(last_page.get_untracked())
            >
                "»"
            </button>
        </div>
    }
}
