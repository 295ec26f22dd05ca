//! The application shell: session gate, sign-in surface, and the task
//! manager view model that drives the list and calendar presentations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dayboard_core::calendar::{deadline_days, tasks_on_day};
use dayboard_core::task::{NewTask, Priority, Task};
use dayboard_core::validate::{TEXT_LIMIT, ValidationError, at_text_limit, validate_text};
use dayboard_core::view::{SortDir, SortKey, sort_tasks};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::{
    Callback, Html, Properties, UseStateHandle, classes, function_component, html,
    use_effect_with, use_state,
};

use crate::components::{CalendarGrid, DayModal, SortControls, TaskForm, TaskList};
use crate::store::{self, SessionUser};

/// How long a transient notice stays on screen. The clear is unconditional:
/// a later edit does not cancel a pending clear.
const NOTICE_CLEAR_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    List,
    Calendar,
}

/// Session gate. Holds the current user fed by the identity provider's
/// session stream and renders exactly one of the two surfaces. The stream
/// listener is detached when the component unmounts.
#[function_component(App)]
pub fn app() -> Html {
    let user = use_state(|| None::<SessionUser>);

    {
        let user = user.clone();
        use_effect_with((), move |_| {
            let session = store::watch_session(move |next| {
                tracing::info!(signed_in = next.is_some(), "session changed");
                user.set(next);
            });
            move || drop(session)
        });
    }

    html! {
        <div class="app-shell">
            {
                match (*user).clone() {
                    Some(user) => html! { <TaskManager user={user} /> },
                    None => html! { <SignIn /> },
                }
            }
        </div>
    }
}

/// Sign-in surface. Failure (cancel, network, blocked popup) is logged and
/// swallowed; the user retries manually.
#[function_component(SignIn)]
pub fn sign_in() -> Html {
    let onclick = Callback::from(|_| {
        spawn_local(async {
            if let Err(err) = store::sign_in().await {
                tracing::error!(error = %err, "sign-in failed");
            }
        });
    });

    html! {
        <div class="signin">
            <button class="btn signin-btn" {onclick}>{ "Sign in with Google" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskManagerProps {
    pub user: SessionUser,
}

#[function_component(TaskManager)]
pub fn task_manager(props: &TaskManagerProps) -> Html {
    let tasks = use_state(Vec::<Task>::new);
    let input = use_state(String::new);
    let priority = use_state(Priority::default);
    let deadline_input = use_state(String::new);
    let sort_key = use_state(|| SortKey::Priority);
    let priority_dir = use_state(SortDir::default);
    let deadline_dir = use_state(SortDir::default);
    let mode = use_state(|| ViewMode::List);
    let notice = use_state(|| None::<String>);
    let focus = use_state(|| Utc::now().date_naive());
    let modal_day = use_state(|| None::<NaiveDate>);

    // Live subscription for the signed-in user's tasks; each emission
    // replaces the snapshot wholesale. Torn down on unmount or user change.
    {
        let tasks = tasks.clone();
        use_effect_with(props.user.uid.clone(), move |uid: &String| {
            let subscription = store::subscribe_tasks(uid, move |snapshot| {
                tasks.set(snapshot);
            });
            move || drop(subscription)
        });
    }

    let visible = {
        let mut list = (*tasks).clone();
        let dir = match *sort_key {
            SortKey::Priority => *priority_dir,
            SortKey::Deadline => *deadline_dir,
        };
        sort_tasks(&mut list, *sort_key, dir);
        list
    };
    let marked = deadline_days(&visible);

    let on_input = {
        let input = input.clone();
        let notice = notice.clone();
        Callback::from(move |value: String| {
            if at_text_limit(&value) {
                flash_notice(
                    notice.clone(),
                    format!("Task text is capped at {TEXT_LIMIT} characters."),
                );
            }
            input.set(value);
        })
    };

    let on_priority = {
        let priority = priority.clone();
        Callback::from(move |next: Priority| priority.set(next))
    };

    let on_deadline = {
        let deadline_input = deadline_input.clone();
        Callback::from(move |value: String| deadline_input.set(value))
    };

    let on_add = {
        let input = input.clone();
        let priority = priority.clone();
        let deadline_input = deadline_input.clone();
        let notice = notice.clone();
        let uid = props.user.uid.clone();
        Callback::from(move |_| {
            let new_task = match build_new_task(
                &input,
                *priority,
                &uid,
                Utc::now(),
                &deadline_input,
            ) {
                Ok(new_task) => new_task,
                Err(err) => {
                    flash_notice(notice.clone(), err.to_string());
                    return;
                }
            };

            // Pending input clears only on the path that actually issues a
            // create; the priority selection is retained.
            input.set(String::new());
            deadline_input.set(String::new());

            let notice = notice.clone();
            spawn_local(async move {
                match store::create_task(&new_task).await {
                    Ok(id) => tracing::info!(%id, "created task"),
                    Err(err) => {
                        tracing::error!(error = %err, "create failed");
                        flash_notice(notice, "Could not save the task. Try again.".to_string());
                    }
                }
            });
        })
    };

    let on_delete = {
        let notice = notice.clone();
        Callback::from(move |id: String| {
            let notice = notice.clone();
            // No optimistic removal; the next snapshot reflects the delete.
            spawn_local(async move {
                match store::delete_task(&id).await {
                    Ok(()) => tracing::info!(%id, "deleted task"),
                    Err(err) => {
                        tracing::error!(error = %err, "delete failed");
                        flash_notice(notice, "Could not delete the task. Try again.".to_string());
                    }
                }
            });
        })
    };

    let on_sort = {
        let sort_key = sort_key.clone();
        let priority_dir = priority_dir.clone();
        let deadline_dir = deadline_dir.clone();
        Callback::from(move |key: SortKey| {
            if *sort_key == key {
                match key {
                    SortKey::Priority => priority_dir.set((*priority_dir).toggle()),
                    SortKey::Deadline => deadline_dir.set((*deadline_dir).toggle()),
                }
            } else {
                sort_key.set(key);
            }
        })
    };

    let on_day = {
        let modal_day = modal_day.clone();
        Callback::from(move |day: NaiveDate| modal_day.set(Some(day)))
    };

    let on_focus = {
        let focus = focus.clone();
        Callback::from(move |next: NaiveDate| focus.set(next))
    };

    let on_sign_out = Callback::from(|_| {
        spawn_local(async {
            if let Err(err) = store::sign_out().await {
                tracing::error!(error = %err, "sign-out failed");
            }
        });
    });

    let mode_button = |target: ViewMode, label: &str| {
        let mode = mode.clone();
        let active = *mode == target;
        html! {
            <button
                class={classes!("btn", "mode", active.then_some("active"))}
                onclick={move |_| mode.set(target)}
            >
                { label }
            </button>
        }
    };

    let who = props
        .user
        .display_name
        .clone()
        .or_else(|| props.user.email.clone())
        .unwrap_or_else(|| "Signed in".to_string());

    let modal = (*modal_day)
        .map(|day| {
            let day_tasks = tasks_on_day(&visible, day);
            let on_close = {
                let modal_day = modal_day.clone();
                Callback::from(move |_| modal_day.set(None))
            };
            html! { <DayModal day={day} tasks={day_tasks} on_close={on_close} /> }
        })
        .unwrap_or_default();

    html! {
        <div class="board">
            <div class="board-header">
                <h1 class="board-title">{ "My To-Do List" }</h1>
                <span class="board-user">{ who }</span>
                <div class="mode-switch">
                    { mode_button(ViewMode::List, "List") }
                    { mode_button(ViewMode::Calendar, "Calendar") }
                </div>
                <button class="btn signout" onclick={on_sign_out}>{ "Logout" }</button>
            </div>
            {
                if let Some(message) = (*notice).clone() {
                    html! { <div class="notice">{ message }</div> }
                } else {
                    html! {}
                }
            }
            <TaskForm
                input={(*input).clone()}
                priority={*priority}
                deadline={(*deadline_input).clone()}
                on_input={on_input}
                on_priority={on_priority}
                on_deadline={on_deadline}
                on_add={on_add}
            />
            {
                match *mode {
                    ViewMode::List => html! {
                        <>
                            <SortControls
                                active={*sort_key}
                                priority_dir={*priority_dir}
                                deadline_dir={*deadline_dir}
                                on_sort={on_sort}
                            />
                            <TaskList tasks={visible.clone()} on_delete={on_delete} />
                        </>
                    },
                    ViewMode::Calendar => html! {
                        <CalendarGrid
                            focus={*focus}
                            marked={marked.clone()}
                            on_day={on_day}
                            on_focus={on_focus}
                        />
                    },
                }
            }
            { modal }
        </div>
    }
}

/// Builds the create payload for the add path. Empty-after-trim text is
/// rejected before any create is issued; the stored text is the raw input.
fn build_new_task(
    text: &str,
    priority: Priority,
    owner: &str,
    now: DateTime<Utc>,
    deadline_raw: &str,
) -> Result<NewTask, ValidationError> {
    validate_text(text)?;
    Ok(NewTask {
        text: text.to_string(),
        priority,
        owner: owner.to_string(),
        created_at: now,
        deadline: parse_deadline_input(deadline_raw),
    })
}

/// Shows a transient notice and schedules its clear. The timer is never
/// cancelled; whichever notice is current after the delay is wiped.
fn flash_notice(notice: UseStateHandle<Option<String>>, message: String) {
    notice.set(Some(message));
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_CLEAR_MS).await;
        notice.set(None);
    });
}

/// Parses the `datetime-local` control's value. Empty input means "no
/// deadline"; unparsable input is logged and treated the same way.
fn parse_deadline_input(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .map(|naive| naive.and_utc())
        .map_err(|err| tracing::warn!(error = %err, raw = %trimmed, "ignoring deadline input"))
        .ok()
}
