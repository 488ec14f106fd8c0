use crate::completion::{plan_toggle, today_entry, TogglePlan};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardDescription, CardHeader,
    CardTitle, Input, Label, Spinner,
};
use crate::models::{CreateHabitRequest, Habit};
use crate::state::habit_card::{reduce, CardEvent, CardState};
use crate::state::AppContext;
use crate::util::CalendarDay;
use futures::future;
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// One habit with its completion toggle and backend-derived stats.
///
/// The card owns its own entries+stats snapshot; the parent list only hears
/// about deletes (`on_delete`, optimistic removal) and successful writes
/// (`on_update`, to refresh aggregate state).
#[component]
pub fn HabitCard(
    habit: Habit,
    #[prop(into)] on_delete: Callback<i64>,
    #[prop(into)] on_update: Callback<()>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let habit_id = habit.id;
    let habit_name = habit.name.clone();
    let habit_description = habit.description.clone();

    let card: RwSignal<CardState> = RwSignal::new(CardState {
        loading: true,
        ..CardState::default()
    });
    let toggling: RwSignal<bool> = RwSignal::new(false);

    // Stale-response guard for reloads.
    let load_request_id: RwSignal<u64> = RwSignal::new(0);

    let delete_open: RwSignal<bool> = RwSignal::new(false);
    let delete_loading: RwSignal<bool> = RwSignal::new(false);
    let delete_error: RwSignal<Option<String>> = RwSignal::new(None);

    let rename_open: RwSignal<bool> = RwSignal::new(false);
    let rename_value: RwSignal<String> = RwSignal::new(habit.name.clone());
    let rename_desc: RwSignal<String> =
        RwSignal::new(habit.description.clone().unwrap_or_default());
    let rename_loading: RwSignal<bool> = RwSignal::new(false);
    let rename_error: RwSignal<Option<String>> = RwSignal::new(None);

    let dispatch = move |ev: CardEvent| card.update(|s| *s = reduce(std::mem::take(s), ev));

    let load_card = move || {
        let req_id = load_request_id.get_untracked().saturating_add(1);
        load_request_id.set(req_id);

        dispatch(CardEvent::LoadStarted);

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            // Entries and stats are independent; fetch both at once and
            // join before touching state.
            let (entries, stats) = future::join(
                api_client.get_habit_entries(habit_id),
                api_client.get_habit_stats(habit_id),
            )
            .await;

            // Ignore stale responses.
            if load_request_id.get_untracked() != req_id {
                return;
            }

            match (entries, stats) {
                (Ok(entries), Ok(stats)) => dispatch(CardEvent::Loaded { entries, stats }),
                (Err(e), _) | (_, Err(e)) => {
                    logging::error!("Failed to load habit {habit_id}: {e}");
                    dispatch(CardEvent::LoadFailed(e.to_string()));
                }
            }
        });
    };

    Effect::new(move |_| {
        load_card();
    });

    let completed_today = move || {
        let today = CalendarDay::today_local();
        today_entry(&card.get().entries, today)
            .map(|e| e.completed)
            .unwrap_or(false)
    };

    let on_toggle = move |_: web_sys::MouseEvent| {
        if toggling.get_untracked() {
            return;
        }

        let today = CalendarDay::today_local();
        let entries = card.get_untracked().entries;
        let plan = plan_toggle(habit_id, today, &entries);

        let api_client = app_state.0.api_client.get_untracked();
        toggling.set(true);

        spawn_local(async move {
            let written = match plan {
                TogglePlan::Create(request) => {
                    api_client.create_habit_entry(&request).await.map(|_| ())
                }
                TogglePlan::Update { entry_id, request } => api_client
                    .update_habit_entry(entry_id, &request)
                    .await
                    .map(|_| ()),
            };

            match written {
                Ok(()) => {
                    load_card();
                    on_update.run(());
                }
                Err(e) => {
                    logging::error!("Failed to toggle habit {habit_id}: {e}");
                    dispatch(CardEvent::LoadFailed(e.to_string()));
                }
            }
            toggling.set(false);
        });
    };

    let on_submit_delete = move |_: web_sys::MouseEvent| {
        if delete_loading.get_untracked() {
            return;
        }

        let api_client = app_state.0.api_client.get_untracked();
        delete_loading.set(true);
        delete_error.set(None);

        spawn_local(async move {
            match api_client.delete_habit(habit_id).await {
                Ok(()) => {
                    delete_open.set(false);
                    // Parent removes the habit locally; no full reload.
                    on_delete.run(habit_id);
                }
                Err(e) => {
                    logging::error!("Failed to delete habit {habit_id}: {e}");
                    delete_error.set(Some(e.to_string()));
                }
            }
            delete_loading.set(false);
        });
    };

    let on_submit_rename = move |_: web_sys::MouseEvent| {
        if rename_loading.get_untracked() {
            return;
        }

        let Some(req) = CreateHabitRequest::from_form(
            &rename_value.get_untracked(),
            &rename_desc.get_untracked(),
        ) else {
            rename_error.set(Some("Name cannot be empty".to_string()));
            return;
        };

        let api_client = app_state.0.api_client.get_untracked();
        rename_loading.set(true);
        rename_error.set(None);

        spawn_local(async move {
            match api_client.update_habit(habit_id, &req).await {
                Ok(_) => {
                    rename_open.set(false);
                    // Parent reloads the list so the card re-renders with the new name.
                    on_update.run(());
                }
                Err(e) => {
                    logging::error!("Failed to rename habit {habit_id}: {e}");
                    rename_error.set(Some(e.to_string()));
                }
            }
            rename_loading.set(false);
        });
    };

    let habit_name_for_delete = habit_name.clone();

    view! {
        <Card class="group relative">
            <CardHeader class="pr-16">
                <CardTitle class="text-base">{habit_name.clone()}</CardTitle>
                {habit_description
                    .clone()
                    .map(|d| view! { <CardDescription class="text-xs">{d.clone()}</CardDescription> })}
            </CardHeader>

            <div class="absolute right-4 top-4 hidden items-center gap-1 group-hover:flex">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="h-7 w-7"
                    attr:title="Rename"
                    on:click=move |_| {
                        rename_error.set(None);
                        rename_open.set(true);
                    }
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="16"
                        height="16"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class="text-muted-foreground"
                        aria-hidden="true"
                    >
                        <path d="M12 20h9" />
                        <path d="M16.5 3.5a2.121 2.121 0 0 1 3 3L7 19l-4 1 1-4Z" />
                    </svg>
                </Button>

                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="h-7 w-7 text-destructive"
                    attr:title="Delete"
                    on:click=move |_| {
                        delete_error.set(None);
                        delete_open.set(true);
                    }
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="16"
                        height="16"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        aria-hidden="true"
                    >
                        <path d="M3 6h18" />
                        <path d="M8 6V4h8v2" />
                        <path d="M19 6l-1 14H6L5 6" />
                        <path d="M10 11v6" />
                        <path d="M14 11v6" />
                    </svg>
                </Button>
            </div>

            <div class="flex flex-col gap-3 px-6">
                <Show when=move || card.get().error.is_some() fallback=|| ().into_view()>
                    {move || {
                        card.get().error.map(|e| view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        })
                    }}
                </Show>

                {move || {
                    let completed = completed_today();
                    let class = if completed {
                        "w-full bg-success text-success-foreground hover:bg-success/90"
                    } else {
                        "w-full"
                    };
                    view! {
                        <Button
                            class=class
                            attr:disabled=move || toggling.get() || card.get().loading
                            on:click=on_toggle
                        >
                            <span class="inline-flex items-center gap-2">
                                <Show
                                    when=move || toggling.get() || card.get().loading
                                    fallback=|| view! {
                                        <svg
                                            xmlns="http://www.w3.org/2000/svg"
                                            width="16"
                                            height="16"
                                            viewBox="0 0 24 24"
                                            fill="none"
                                            stroke="currentColor"
                                            stroke-width="2"
                                            stroke-linecap="round"
                                            stroke-linejoin="round"
                                            aria-hidden="true"
                                        >
                                            <rect x="3" y="4" width="18" height="18" rx="2" />
                                            <path d="M16 2v4" />
                                            <path d="M8 2v4" />
                                            <path d="M3 10h18" />
                                        </svg>
                                    }
                                >
                                    <Spinner />
                                </Show>
                                {if completed { "Completed today!" } else { "Mark as done today" }}
                            </span>
                        </Button>
                    }
                }}

                <Show when=move || card.get().stats.is_some() fallback=|| ().into_view()>
                    {move || {
                        card.get().stats.map(|stats| view! {
                            <div class="grid grid-cols-2 gap-2">
                                <div class="rounded-md border border-border px-3 py-2">
                                    <div class="text-sm font-semibold">
                                        {format!("{:.0}%", stats.completion_rate)}
                                    </div>
                                    <div class="text-xs text-muted-foreground">"Completion rate"</div>
                                </div>
                                <div class="rounded-md border border-border px-3 py-2">
                                    <div class="text-sm font-semibold">{stats.current_streak}</div>
                                    <div class="text-xs text-muted-foreground">"Current streak"</div>
                                </div>
                                <div class="rounded-md border border-border px-3 py-2">
                                    <div class="text-sm font-semibold">{stats.longest_streak}</div>
                                    <div class="text-xs text-muted-foreground">"Longest streak"</div>
                                </div>
                                <div class="rounded-md border border-border px-3 py-2">
                                    <div class="text-sm font-semibold">
                                        {format!("{}/{}", stats.completed_days, stats.total_days)}
                                    </div>
                                    <div class="text-xs text-muted-foreground">"Days completed"</div>
                                </div>
                            </div>
                        })
                    }}
                </Show>
            </div>

            <Show when=move || rename_open.get() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium">"Edit habit"</div>
                        </div>

                        <div class="space-y-2">
                            <div class="space-y-1">
                                <Label class="text-xs">"Name"</Label>
                                <Input bind_value=rename_value class="h-8 text-sm" />
                            </div>
                            <div class="space-y-1">
                                <Label class="text-xs">"Description (optional)"</Label>
                                <Input bind_value=rename_desc class="h-8 text-sm" />
                            </div>

                            <Show when=move || rename_error.get().is_some() fallback=|| ().into_view()>
                                {move || rename_error.get().map(|e| view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                })}
                            </Show>

                            <div class="flex items-center justify-end gap-2 pt-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    attr:disabled=move || rename_loading.get()
                                    on:click=move |_| rename_open.set(false)
                                >
                                    "Cancel"
                                </Button>
                                <Button
                                    size=ButtonSize::Sm
                                    attr:disabled=move || rename_loading.get()
                                    on:click=on_submit_rename
                                >
                                    <span class="inline-flex items-center gap-2">
                                        <Show when=move || rename_loading.get() fallback=|| ().into_view()>
                                            <Spinner />
                                        </Show>
                                        {move || if rename_loading.get() { "Saving..." } else { "Save" }}
                                    </span>
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || delete_open.get() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium text-destructive">"Delete habit"</div>
                            <div class="text-xs text-muted-foreground">
                                {format!("\"{}\" and all of its entries will be removed.", habit_name_for_delete)}
                            </div>
                        </div>

                        <div class="space-y-2">
                            <Show when=move || delete_error.get().is_some() fallback=|| ().into_view()>
                                {move || delete_error.get().map(|e| view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                })}
                            </Show>

                            <div class="flex items-center justify-end gap-2 pt-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    attr:disabled=move || delete_loading.get()
                                    on:click=move |_| delete_open.set(false)
                                >
                                    "Cancel"
                                </Button>
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    class="border-destructive/40 text-destructive"
                                    attr:disabled=move || delete_loading.get()
                                    on:click=on_submit_delete
                                >
                                    <span class="inline-flex items-center gap-2">
                                        <Show when=move || delete_loading.get() fallback=|| ().into_view()>
                                            <Spinner />
                                        </Show>
                                        {move || if delete_loading.get() { "Deleting..." } else { "Delete" }}
                                    </span>
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>
        </Card>
    }
}
