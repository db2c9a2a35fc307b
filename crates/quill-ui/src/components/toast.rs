use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastContext {
    pub fn info(&self, title: &str, message: impl Into<String>) {
        self.push(title, message.into(), ToastKind::Info);
    }

    pub fn error(&self, title: &str, message: impl Into<String>) {
        self.push(title, message.into(), ToastKind::Error);
    }

    fn push(&self, title: &str, message: String, kind: ToastKind) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                title: title.to_string(),
                message,
                kind,
            });
        });

        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|list| list.retain(|t| t.id != id)),
            std::time::Duration::from_secs(4),
        );
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

/// Toasts are optional: components rendered outside the provider just
/// skip them.
pub fn use_toasts() -> Option<ToastContext> {
    use_context::<ToastContext>()
}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let ctx = ToastContext {
        toasts: RwSignal::new(Vec::new()),
        next_id: RwSignal::new(0),
    };
    provide_context(ctx);

    view! {
        {children()}
        <div class="toast-container">
            <For each=move || ctx.toasts.get() key=|toast| toast.id let:toast>
                <div
                    class=match toast.kind {
                        ToastKind::Info => "toast toast-info",
                        ToastKind::Error => "toast toast-error",
                    }
                    on:click=move |_| ctx.dismiss(toast.id)
                >
                    <strong>{toast.title.clone()}</strong>
                    <span>{toast.message.clone()}</span>
                </div>
            </For>
        </div>
    }
}
