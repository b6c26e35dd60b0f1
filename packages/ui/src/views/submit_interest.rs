use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::auth::use_backend;
use crate::routes::Route;
use crate::submission::{schedule_redirect, submit_topic, TopicForm};
use crate::timer::Deferred;

/// Topic suggestion form.
#[component]
pub fn SubmitInterest() -> Element {
    let backend = use_backend();
    let nav = use_navigator();
    let mut form = use_signal(TopicForm::new);

    // Pending navigation home; dropping the token on unmount cancels it.
    let redirect: Rc<RefCell<Option<Deferred>>> = use_hook(|| Rc::new(RefCell::new(None)));
    use_drop({
        let redirect = redirect.clone();
        move || {
            redirect.borrow_mut().take();
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(draft) = form.write().begin() else {
            return;
        };

        let backend = backend.clone();
        let redirect = redirect.clone();
        spawn(async move {
            let result = submit_topic(&backend, draft).await;
            let succeeded = result.is_ok();
            form.write().finish(result);

            if succeeded {
                let (token, navigate_home) = schedule_redirect(move || {
                    nav.push(Route::Home {});
                });
                redirect.borrow_mut().replace(token);
                navigate_home.await;
            }
        });
    };

    let state = form.read();
    let submitting = state.is_submitting();

    rsx! {
        div {
            class: "container narrow",
            div {
                class: "card",
                h1 { "Submit a Topic of Interest" }

                form {
                    class: "form",
                    onsubmit: handle_submit,

                    div {
                        class: "field",
                        label { r#for: "title", "Topic Title" }
                        input {
                            id: "title",
                            r#type: "text",
                            required: true,
                            placeholder: "e.g., Advanced Natural Language Processing",
                            value: "{state.title}",
                            oninput: move |evt: FormEvent| form.write().title = evt.value(),
                        }
                    }

                    div {
                        class: "field",
                        label { r#for: "description", "Description" }
                        textarea {
                            id: "description",
                            required: true,
                            rows: 4,
                            placeholder: "Describe what you'd like to learn about this topic...",
                            value: "{state.description}",
                            oninput: move |evt: FormEvent| form.write().description = evt.value(),
                        }
                    }

                    if let Some(err) = state.error() {
                        div { class: "alert alert-error", "{err}" }
                    }

                    if state.succeeded() {
                        div {
                            class: "alert alert-success",
                            "Your topic has been submitted successfully! Redirecting..."
                        }
                    }

                    button {
                        class: "btn btn-primary btn-block",
                        r#type: "submit",
                        disabled: !state.can_submit(),
                        if submitting { "Submitting..." } else { "Submit Topic" }
                    }
                }
            }
        }
    }
}
