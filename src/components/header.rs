use crate::api::format_header_date;
use crate::components::{AppView, Icon};
use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    let today = format_header_date(chrono::Local::now().date_naive());

    rsx! {
        header { class: "site-header",
            Link { to: AppView::HomeView {}, class: "site-header__brand",
                Icon { name: "mic".to_string(), class: "icon".to_string() }
                span { "Podcastr" }
            }
            p { "O melhor para você ouvir, sempre" }
            span { class: "site-header__date", "{today}" }
        }
    }
}
