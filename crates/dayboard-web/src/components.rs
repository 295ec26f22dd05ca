//! Presentational components. State and side effects live in `app`; these
//! render the derived view and translate DOM events into typed callbacks.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use dayboard_core::calendar::{add_days, first_day_of_month, next_month, prev_month, start_of_week};
use dayboard_core::task::{Priority, Task};
use dayboard_core::validate::TEXT_LIMIT;
use dayboard_core::view::{SortDir, SortKey};
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, InputEvent, MouseEvent};
use yew::{Callback, Html, Properties, TargetCast, classes, function_component, html};

fn format_deadline(deadline: Option<DateTime<Utc>>) -> String {
    match deadline {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "—".to_string(),
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
    pub input: String,
    pub priority: Priority,
    pub deadline: String,
    pub on_input: Callback<String>,
    pub on_priority: Callback<Priority>,
    pub on_deadline: Callback<String>,
    pub on_add: Callback<MouseEvent>,
}

#[function_component(TaskForm)]
pub fn task_form(props: &TaskFormProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            on_input.emit(value);
        })
    };
    let onchange = {
        let on_priority = props.on_priority.clone();
        Callback::from(move |e: Event| {
            let raw = e.target_unchecked_into::<HtmlSelectElement>().value();
            match raw.parse::<Priority>() {
                Ok(priority) => on_priority.emit(priority),
                Err(err) => tracing::warn!(error = %err, "ignoring priority selection"),
            }
        })
    };
    let on_deadline_input = {
        let on_deadline = props.on_deadline.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            on_deadline.emit(value);
        })
    };

    html! {
        <div class="task-form">
            <input
                type="text"
                class="task-input"
                placeholder="Enter a new task"
                maxlength={TEXT_LIMIT.to_string()}
                value={props.input.clone()}
                oninput={oninput}
            />
            <select class="priority-select" onchange={onchange}>
                {
                    for [Priority::Low, Priority::Normal, Priority::High].into_iter().map(|p| html! {
                        <option value={p.to_string()} selected={props.priority == p}>
                            { p.to_string() }
                        </option>
                    })
                }
            </select>
            <input
                type="datetime-local"
                class="deadline-input"
                value={props.deadline.clone()}
                oninput={on_deadline_input}
            />
            <button class="btn add" onclick={props.on_add.clone()}>{ "Add" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SortControlsProps {
    pub active: SortKey,
    pub priority_dir: SortDir,
    pub deadline_dir: SortDir,
    pub on_sort: Callback<SortKey>,
}

#[function_component(SortControls)]
pub fn sort_controls(props: &SortControlsProps) -> Html {
    let arrow = |dir: SortDir| match dir {
        SortDir::Ascending => "↑",
        SortDir::Descending => "↓",
    };
    let make_button = |key: SortKey, label: &str, dir: SortDir| {
        let on_sort = props.on_sort.clone();
        let active = props.active == key;
        html! {
            <button
                class={classes!("btn", "sort", active.then_some("active"))}
                onclick={move |_| on_sort.emit(key)}
            >
                { format!("{label} {}", arrow(dir)) }
            </button>
        }
    };

    html! {
        <div class="sort-controls">
            { make_button(SortKey::Priority, "Priority", props.priority_dir) }
            { make_button(SortKey::Deadline, "Deadline", props.deadline_dir) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
    pub tasks: Vec<Task>,
    pub on_delete: Callback<String>,
}

#[function_component(TaskList)]
pub fn task_list(props: &TaskListProps) -> Html {
    html! {
        <table class="task-table">
            <thead>
                <tr>
                    <th>{ "Task" }</th>
                    <th>{ "Priority" }</th>
                    <th>{ "Deadline" }</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {
                    for props.tasks.iter().cloned().map(|task| html! {
                        <TaskListRow task={task} on_delete={props.on_delete.clone()} />
                    })
                }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
    pub task: Task,
    pub on_delete: Callback<String>,
}

#[function_component(TaskListRow)]
pub fn task_list_row(props: &TaskListRowProps) -> Html {
    let id = props.task.id.clone();
    let on_delete = props.on_delete.clone();
    let priority_class = format!(
        "badge priority-{}",
        props.task.priority.to_string().to_ascii_lowercase()
    );

    html! {
        <tr class="task-row">
            <td class="task-text">{ &props.task.text }</td>
            <td><span class={priority_class}>{ props.task.priority.to_string() }</span></td>
            <td class="task-deadline">{ format_deadline(props.task.deadline) }</td>
            <td>
                <button class="btn delete" onclick={move |_| on_delete.emit(id.clone())}>
                    { "Delete" }
                </button>
            </td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
pub struct CalendarGridProps {
    pub focus: NaiveDate,
    pub marked: BTreeSet<NaiveDate>,
    pub on_day: Callback<NaiveDate>,
    pub on_focus: Callback<NaiveDate>,
}

#[function_component(CalendarGrid)]
pub fn calendar_grid(props: &CalendarGridProps) -> Html {
    let focus = props.focus;
    let today = Utc::now().date_naive();
    let grid_start = start_of_week(
        first_day_of_month(focus.year(), focus.month()),
        Weekday::Mon,
    );

    let nav_button = |label: &str, target: NaiveDate| {
        let on_focus = props.on_focus.clone();
        html! {
            <button class="btn calendar-nav" onclick={move |_| on_focus.emit(target)}>
                { label }
            </button>
        }
    };

    html! {
        <div class="calendar">
            <div class="calendar-header">
                { nav_button("‹", prev_month(focus)) }
                <div class="calendar-title">{ focus.format("%B %Y").to_string() }</div>
                { nav_button("Today", today) }
                { nav_button("›", next_month(focus)) }
            </div>
            <div class="calendar-weekday-row">
                {
                    for ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"].into_iter().map(|label| html! {
                        <div class="calendar-weekday">{ label }</div>
                    })
                }
            </div>
            <div class="calendar-grid">
                {
                    for (0_i64..42_i64).map(|offset| {
                        let day = add_days(grid_start, offset);
                        let outside = day.month() != focus.month();
                        let has_tasks = props.marked.contains(&day);
                        let on_day = props.on_day.clone();
                        html! {
                            <button
                                type="button"
                                class={classes!(
                                    "calendar-day-cell",
                                    outside.then_some("outside"),
                                    has_tasks.then_some("has-tasks"),
                                    (day == today).then_some("today")
                                )}
                                onclick={move |_| on_day.emit(day)}
                            >
                                <div class="calendar-day-label">{ day.day() }</div>
                                { if has_tasks { html! { <div class="calendar-day-marker"></div> } } else { html! {} } }
                            </button>
                        }
                    })
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DayModalProps {
    pub day: NaiveDate,
    pub tasks: Vec<Task>,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(DayModal)]
pub fn day_modal(props: &DayModalProps) -> Html {
    html! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal-header">
                    <div class="modal-title">
                        { format!("Tasks due {}", props.day.format("%Y-%m-%d")) }
                    </div>
                    <button class="btn close" onclick={props.on_close.clone()}>{ "Close" }</button>
                </div>
                {
                    if props.tasks.is_empty() {
                        html! { <div class="modal-empty">{ "No tasks due on this day." }</div> }
                    } else {
                        html! {
                            <ul class="modal-task-list">
                                {
                                    for props.tasks.iter().map(|task| html! {
                                        <li class="modal-task">
                                            <span class="task-text">{ &task.text }</span>
                                            <span class="badge">{ task.priority.to_string() }</span>
                                            <span class="task-deadline">{ format_deadline(task.deadline) }</span>
                                        </li>
                                    })
                                }
                            </ul>
                        }
                    }
                }
            </div>
        </div>
    }
}
