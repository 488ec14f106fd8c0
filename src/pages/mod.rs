use crate::api::ApiErrorKind;
use crate::components::habit_card::HabitCard;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, Card, CardDescription, CardHeader, CardTitle,
    Input, Label, Spinner,
};
use crate::models::CreateHabitRequest;
use crate::state::{remove_habit, AppContext};
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn HomePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let habits = app_state.0.habits;
    let habits_loading = app_state.0.habits_loading;
    let habits_error = app_state.0.habits_error;

    let form_name: RwSignal<String> = RwSignal::new(String::new());
    let form_desc: RwSignal<String> = RwSignal::new(String::new());
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);
    let form_loading: RwSignal<bool> = RwSignal::new(false);

    let load_habits = move || {
        // Stale-response protection: only the latest request may land.
        let req_id = app_state
            .0
            .habits_request_id
            .get_untracked()
            .saturating_add(1);
        app_state.0.habits_request_id.set(req_id);

        app_state.0.habits_loading.set(true);
        app_state.0.habits_error.set(None);

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.get_habits().await;

            if app_state.0.habits_request_id.get_untracked() != req_id {
                return;
            }

            match result {
                Ok(list) => {
                    app_state.0.habits.set(list);
                }
                Err(e) => {
                    logging::error!("Failed to load habits: {e}");
                    let msg = if e.kind == ApiErrorKind::Network {
                        format!("Backend not reachable. {e}")
                    } else {
                        e.to_string()
                    };
                    app_state.0.habits_error.set(Some(msg));
                }
            }
            app_state.0.habits_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_habits();
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if form_loading.get_untracked() {
            return;
        }

        // Empty names are rejected here; no request goes out.
        let Some(req) =
            CreateHabitRequest::from_form(&form_name.get_untracked(), &form_desc.get_untracked())
        else {
            form_error.set(Some("Habit name is required".to_string()));
            return;
        };

        let api_client = app_state.0.api_client.get_untracked();
        form_loading.set(true);
        form_error.set(None);

        spawn_local(async move {
            match api_client.create_habit(&req).await {
                Ok(_) => {
                    form_name.set(String::new());
                    form_desc.set(String::new());
                    load_habits();
                }
                Err(e) => {
                    logging::error!("Failed to create habit: {e}");
                    form_error.set(Some(e.to_string()));
                }
            }
            form_loading.set(false);
        });
    };

    // A deleted habit disappears locally; the backend was already told.
    let on_delete = Callback::new(move |id: i64| {
        habits.update(|hs| remove_habit(hs, id));
    });

    let on_update = Callback::new(move |_: ()| {
        load_habits();
    });

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[960px] px-4 py-8">
                <div class="mb-6 space-y-1">
                    <h1 class="text-xl font-semibold">"Habit Tracker"</h1>
                    <p class="text-xs text-muted-foreground">"Build better habits, one day at a time"</p>
                </div>

                <form class="mb-6 flex flex-col gap-3 sm:flex-row sm:items-end" on:submit=on_submit>
                    <div class="flex flex-1 flex-col gap-1.5">
                        <Label html_for="habit_name" class="text-xs">"Habit name"</Label>
                        <Input
                            id="habit_name"
                            placeholder="e.g., Drink 8 glasses of water"
                            bind_value=form_name
                            class="h-8 text-sm"
                        />
                    </div>

                    <div class="flex flex-1 flex-col gap-1.5">
                        <Label html_for="habit_description" class="text-xs">"Description (optional)"</Label>
                        <Input
                            id="habit_description"
                            placeholder="Why is this habit important to you?"
                            bind_value=form_desc
                            class="h-8 text-sm"
                        />
                    </div>

                    <Button size=ButtonSize::Sm attr:disabled=move || form_loading.get()>
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || form_loading.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if form_loading.get() { "Adding..." } else { "Add habit" }}
                        </span>
                    </Button>
                </form>

                <Show when=move || form_error.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        form_error.get().map(|e| view! {
                            <Alert class="mb-4 border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        })
                    }}
                </Show>

                <Show when=move || habits_error.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        habits_error.get().map(|e| view! {
                            <Alert class="mb-4 border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        })
                    }}
                </Show>

                <Show
                    when=move || !habits_loading.get() || !habits.get().is_empty()
                    fallback=|| view! {
                        <div class="flex items-center gap-2 text-sm text-muted-foreground">
                            <Spinner />
                            "Loading your habits..."
                        </div>
                    }
                >
                    <Show
                        when=move || !habits.get().is_empty()
                        fallback=|| view! {
                            <Card>
                                <CardHeader>
                                    <CardTitle class="text-base">"No habits yet!"</CardTitle>
                                    <CardDescription class="text-xs">
                                        "Start building better habits by adding your first one above."
                                    </CardDescription>
                                </CardHeader>
                            </Card>
                        }
                    >
                        <div class="grid gap-4 sm:grid-cols-2">
                            {move || {
                                habits
                                    .get()
                                    .into_iter()
                                    .map(|habit| {
                                        view! {
                                            <HabitCard
                                                habit=habit
                                                on_delete=on_delete
                                                on_update=on_update
                                            />
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                </Show>
            </div>
        </div>
    }
}
