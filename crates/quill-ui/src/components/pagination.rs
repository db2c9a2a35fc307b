use leptos::prelude::*;
use quill_client::Pager;

/// Previous/next controls. `on_change` runs after the pager moved.
#[component]
pub fn Pagination<F>(pager: RwSignal<Pager>, on_change: F) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    let step = move |forward: bool| {
        let moved = pager
            .try_update(|p| if forward { p.next_page() } else { p.prev_page() })
            .unwrap_or(false);
        if moved {
            on_change();
        }
    };

    view! {
        <Show when=move || pager.with(|p| p.total_pages() > 1)>
            <div class="pagination">
                <button
                    class="btn btn-secondary"
                    disabled=move || pager.with(|p| !p.has_prev() || p.is_loading())
                    on:click=move |_| step(false)
                >
                    "Previous"
                </button>
                <span class="page-indicator">
                    {move || pager.with(|p| format!("Page {} of {}", p.page(), p.total_pages()))}
                </span>
                <button
                    class="btn btn-secondary"
                    disabled=move || pager.with(|p| !p.has_next() || p.is_loading())
                    on:click=move |_| step(true)
                >
                    "Next"
                </button>
            </div>
        </Show>
    }
}
