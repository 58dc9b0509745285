use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HistoryView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/history", HistoryView)] History {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
            footer { class: "app-footer", "Built for learning. Weekly new quizzes coming. ✨" }
        }
    }
}

#[component]
fn TopBar() -> Element {
    rsx! {
        nav { class: "topbar",
            span { class: "topbar__brand", "PM Quiz Studio" }
            ul {
                li { Link { to: Route::Quiz {}, "Quiz" } }
                li { Link { to: Route::History {}, "History" } }
            }
        }
    }
}
