use leptos::prelude::*;
use quill_client::{DebounceGate, Pager, SEARCH_DEBOUNCE};

/// Search input that updates the pager's query once typing pauses.
#[component]
pub fn SearchBox<F>(pager: RwSignal<Pager>, on_search: F) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    let text = RwSignal::new(pager.with_untracked(|p| p.query().to_string()));
    let gate = RwSignal::new(DebounceGate::<String>::new(SEARCH_DEBOUNCE));

    let onInput = move |ev| {
        let value = event_target_value(&ev);
        text.set(value.clone());

        let Some(ticket) = gate.try_update(|g| g.schedule(value)) else {
            return;
        };
        set_timeout(
            move || {
                // Only the last keystroke's timer finds its ticket still current.
                if let Some(query) = gate.try_update(|g| g.fire(ticket)).flatten() {
                    pager.update(|p| p.set_query(&query));
                    on_search();
                }
            },
            SEARCH_DEBOUNCE,
        );
    };

    let onClear = move |_| {
        gate.update(|g| g.cancel());
        text.set(String::new());
        pager.update(|p| p.set_query(""));
        on_search();
    };

    view! {
        <div class="search-box">
            <input
                type="search"
                placeholder="Search posts..."
                prop:value=move || text.get()
                on:input=onInput
            />
            <Show when=move || !text.with(|t| t.is_empty())>
                <button class="btn btn-ghost" on:click=onClear>
                    "Clear"
                </button>
            </Show>
        </div>
    }
}
