use yew::prelude::*;
use yew_hooks::use_title;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    use_title("Page not found | Arclight Studio".to_string());

    html! {
        <main class="page page--not-found">
            <h1>{"404"}</h1>
            <p>{"We couldn't find that page."}</p>
            <Link<Route> to={Route::Home} classes="button button--primary">{"Back to home"}</Link<Route>>
        </main>
    }
}
