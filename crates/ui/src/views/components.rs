use dioxus::prelude::*;
use quiz_core::Step;

use crate::views::ViewError;
use crate::vm::{DropdownStatus, DropdownVm, QuestionVm, QuizIntent, QuizPanelVm, ResultVm};

#[component]
pub fn Dropdown(
    vm: DropdownVm,
    on_select: EventHandler<String>,
    on_retry: EventHandler<Step>,
) -> Element {
    if !vm.is_visible() {
        return rsx! {};
    }
    let step = vm.step;

    rsx! {
        div { class: "field", id: "{vm.id}-field",
            label { class: "field__label", r#for: "{vm.id}", "{vm.label}" }
            match vm.status.clone() {
                DropdownStatus::Hidden => rsx! {},
                DropdownStatus::Loading => rsx! {
                    p { class: "field__loading", "Loading..." }
                },
                DropdownStatus::Failed(message) => rsx! {
                    div { class: "field__error",
                        p { "{message}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_retry.call(step),
                            "Retry"
                        }
                    }
                },
                DropdownStatus::Ready => rsx! {
                    select {
                        class: "field__select",
                        id: "{vm.id}",
                        value: "{vm.selected}",
                        onchange: move |evt: FormEvent| on_select.call(evt.value()),
                        option { value: "", selected: vm.selected.is_empty(), "{vm.placeholder}" }
                        for item in vm.options.iter() {
                            option {
                                key: "{item.value}",
                                value: "{item.value}",
                                selected: item.value == vm.selected,
                                "{item.label}"
                            }
                        }
                    }
                    if vm.is_empty() {
                        p { class: "field__hint", "Nothing to choose from yet." }
                    }
                },
            }
        }
    }
}

#[component]
pub fn QuestionPanel(
    vm: QuizPanelVm,
    notice: Option<ViewError>,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    match vm {
        QuizPanelVm::Hidden => rsx! {},
        QuizPanelVm::Loading => rsx! {
            section { class: "question",
                p { class: "question__loading", "Loading question..." }
            }
        },
        QuizPanelVm::Failed(message) => rsx! {
            section { class: "question question--failed",
                p { "{message}" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Retry(Step::Question)),
                    "Retry"
                }
            }
        },
        QuizPanelVm::Question(question) => rsx! {
            QuestionCard { vm: question, notice, on_intent }
        },
        QuizPanelVm::Completed { result, score_label } => rsx! {
            section { class: "question question--complete",
                if let Some(result) = result {
                    ResultLine { result }
                }
                h3 { class: "question__complete", "{score_label}" }
            }
        },
    }
}

#[component]
fn QuestionCard(
    vm: QuestionVm,
    notice: Option<ViewError>,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let locked = vm.locked;
    let submit_label = if vm.grading { "Checking..." } else { "Submit" };

    rsx! {
        section { class: "question",
            header { class: "question__header",
                if let Some(progress) = vm.progress_label.as_deref() {
                    span { class: "question__progress", "{progress}" }
                }
                span { class: "question__kind", "{vm.kind_label}" }
                span { class: "question__score", "{vm.score_label}" }
            }
            h3 { class: "question__text", "{vm.text}" }
            if !vm.choices.is_empty() {
                div { class: "question__choices",
                    for choice in vm.choices.iter() {
                        ChoiceChip {
                            key: "{choice.label}",
                            label: choice.label.clone(),
                            selected: choice.selected,
                            disabled: locked,
                            on_intent,
                        }
                    }
                }
            }
            if let Some(value) = vm.text_input.clone() {
                input {
                    class: "question__input",
                    r#type: "text",
                    placeholder: "Type your answer",
                    value: "{value}",
                    disabled: locked,
                    oninput: move |evt: FormEvent| on_intent.call(QuizIntent::SetText(evt.value())),
                }
            }
            button {
                class: "btn btn-primary question__submit",
                id: "question-submit",
                r#type: "button",
                disabled: locked,
                onclick: move |_| on_intent.call(QuizIntent::Submit),
                "{submit_label}"
            }
            if let Some(message) = vm.grading_error {
                div { class: "question__error",
                    p { "{message}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Retry(Step::Grading)),
                        "Retry"
                    }
                }
            }
            if let Some(result) = vm.result.clone() {
                ResultLine { result }
            }
            if let Some(notice) = notice {
                p { class: "question__notice", "{notice.message()}" }
            }
        }
    }
}

#[component]
fn ChoiceChip(
    label: String,
    selected: bool,
    disabled: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let class = if selected { "chip chip--selected" } else { "chip" };
    let value = label.clone();

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            aria_pressed: "{selected}",
            disabled: disabled,
            onclick: move |_| on_intent.call(QuizIntent::SelectOption(value.clone())),
            "{label}"
        }
    }
}

#[component]
fn ResultLine(result: ResultVm) -> Element {
    let class = if result.correct {
        "result result--correct"
    } else {
        "result result--incorrect"
    };

    rsx! {
        p { class: "{class}", "{result.label}" }
    }
}
