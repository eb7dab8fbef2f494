use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use web_sys::{window, MouseEvent};

mod config;
mod data;
mod boundary;
mod submission;
mod validation;
mod effects {
    pub mod listener;
    pub mod media;
    pub mod scroll;
}
mod sequencing {
    pub mod progress;
    pub mod transition;
    #[cfg(test)]
    pub mod test_timers;
}
mod integrations {
    pub mod gate;
    pub mod tags;
    pub mod image_cdn;
}
mod components {
    pub mod cursor;
    pub mod footer;
    pub mod hero;
    pub mod scroll_progress;
    pub mod service_card;
}
mod pages {
    pub mod home;
    pub mod about;
    pub mod services;
    pub mod work;
    pub mod contact;
    pub mod not_found;
}

use boundary::{install_panic_page, FaultBoundary};
use components::{
    cursor::CustomCursor,
    footer::Footer,
    scroll_progress::ScrollProgressBar,
};
use effects::listener::EventListenerGuard;
use integrations::{
    gate::IntegrationsProvider,
    tags::{Analytics, StructuredData, TagManager},
};
use pages::{
    about::About,
    contact::Contact,
    home::Home,
    not_found::NotFound,
    services::Services,
    work::Work,
};
use sequencing::{progress::NavigationProgress, transition::PageTransition};

/// Pixels scrolled before the nav switches to its compact style.
const NAV_SCROLL_THRESHOLD: i32 = 24;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/about")]
    About,
    #[at("/services")]
    Services,
    #[at("/work")]
    Work,
    #[at("/contact")]
    Contact,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::About => {
            info!("Rendering About page");
            html! { <About /> }
        },
        Route::Services => {
            info!("Rendering Services page");
            html! { <Services /> }
        },
        Route::Work => {
            info!("Rendering Work page");
            html! { <Work /> }
        },
        Route::Contact => {
            info!("Rendering Contact page");
            html! { <Contact /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state_eq(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let guard = window().and_then(|window| {
                EventListenerGuard::new(&window, "scroll", move |_| {
                    let scroll_top = web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|d| d.document_element())
                        .map(|root| root.scroll_top())
                        .unwrap_or(0);
                    is_scrolled.set(scroll_top > NAV_SCROLL_THRESHOLD);
                })
            });
            move || drop(guard)
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"arclight"}
                </Link<Route>>

                <button class="burger-menu" aria-label="Menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::About} classes="nav-link">{"About"}</Link<Route>>
                    </div>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Services} classes="nav-link">{"Services"}</Link<Route>>
                    </div>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Work} classes="nav-link">{"Work"}</Link<Route>>
                    </div>
                    <div onclick={close_menu}>
                        <Link<Route> to={Route::Contact} classes="nav-cta-button">{"Start a project"}</Link<Route>>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// The loader runs once per app mount. Only the keyed wrapper restarts on
/// navigation, replaying the CSS fade without going back to Loading.
#[function_component(RoutedContent)]
fn routed_content() -> Html {
    let path = use_location()
        .map(|location| location.path().to_string())
        .unwrap_or_default();

    html! {
        <PageTransition>
            <div key={path} class="route-fade">
                <Switch<Route> render={switch} />
            </div>
        </PageTransition>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <IntegrationsProvider>
                <TagManager />
                <Analytics />
                <StructuredData />
                <NavigationProgress />
                <ScrollProgressBar />
                <CustomCursor />
                <Nav />
                <FaultBoundary>
                    <RoutedContent />
                </FaultBoundary>
                <Footer />
            </IntegrationsProvider>
        </BrowserRouter>
    }
}

fn main() {
    // Panics replace the page with a reload panel after logging to the console
    install_panic_page();

    if console_log::init_with_level(Level::Info).is_err() {
        gloo_console::warn!("logger already initialised");
    }

    #[cfg(debug_assertions)]
    tracing_wasm::set_as_global_default();

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve_from_paths() {
        assert_eq!(Route::recognize("/"), Some(Route::Home));
        assert_eq!(Route::recognize("/services"), Some(Route::Services));
        assert_eq!(Route::recognize("/contact"), Some(Route::Contact));
        assert_eq!(Route::recognize("/no-such-page"), Some(Route::NotFound));
    }

    #[test]
    fn routes_render_their_paths() {
        assert_eq!(Route::Work.to_path(), "/work");
        assert_eq!(Route::About.to_path(), "/about");
    }
}
