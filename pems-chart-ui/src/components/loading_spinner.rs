//! Loading indicator shown while the fixtures are loaded.

use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "Loading PeMS data..."
        }
    }
}
