use dioxus::prelude::*;

use crate::name_editor::{save_name, NameEditor};
use crate::services::AppServices;
use crate::state::StateCell;

/// Inline editor for an input's document name.
///
/// The owner keeps the editor so it can push server-chosen names into it.
#[component]
pub fn DocumentName(editor: Signal<NameEditor>) -> Element {
    let services = use_context::<AppServices>();
    // Armed on mousedown of the save control, which fires before the blur.
    let mut save_armed = use_signal(|| false);

    let save = use_callback(move |_: ()| {
        let services = services.clone();
        spawn(async move {
            let _ = save_name(editor, &services.backend, &services.host).await;
        });
    });

    let text = editor.read().text().to_string();
    let editing = editor.read().is_editing();
    let saving = editor.read().is_saving();
    let class = if editing { "name-input editing" } else { "name-input" };

    rsx! {
        div {
            class: "document-name",
            input {
                id: "documentName",
                class,
                r#type: "text",
                value: "{text}",
                readonly: !editing || saving,
                title: "Double-click to rename",
                ondoubleclick: move |_| {
                    editor.with_state(NameEditor::activate);
                },
                oninput: move |evt| editor.with_state(|e| e.edit(evt.value())),
                onkeydown: move |evt| match evt.key() {
                    Key::Enter => save.call(()),
                    Key::Escape => editor.with_state(NameEditor::discard),
                    _ => {}
                },
                onblur: move |_| {
                    let armed = save_armed();
                    save_armed.set(false);
                    editor.with_state(|e| e.blur(armed));
                },
            }
            if editing {
                button {
                    class: "save-button",
                    disabled: saving,
                    onmousedown: move |_| save_armed.set(true),
                    onclick: move |_| save.call(()),
                    if saving { "Saving..." } else { "💾 Save" }
                }
            }
        }
    }
}
