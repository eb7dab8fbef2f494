use std::rc::Rc;

use gloo_net::http::Request;
use serde::Serialize;
use web_sys::window;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config;
use crate::Route;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultInfo {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl FaultInfo {
    pub fn new(component: &str, message: impl Into<String>) -> Self {
        FaultInfo {
            message: message.into(),
            component: Some(component.to_string()),
            route: None,
        }
    }
}

/// Once faulted the boundary stays faulted until an explicit reset, and the
/// first fault is the one kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FaultState {
    #[default]
    Ok,
    Faulted(FaultInfo),
}

impl FaultState {
    pub fn fault(self, info: FaultInfo) -> Self {
        match self {
            FaultState::Ok => FaultState::Faulted(info),
            faulted => faulted,
        }
    }

    pub fn reset(self) -> Self {
        FaultState::Ok
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self, FaultState::Faulted(_))
    }
}

pub enum FaultAction {
    Fault(FaultInfo),
    Reset,
}

impl Reducible for FaultState {
    type Action = FaultAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            FaultAction::Fault(info) => (*self).clone().fault(info),
            FaultAction::Reset => (*self).clone().reset(),
        };
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

/// Handle given to the subtree so any component can hand its failure up.
#[derive(Clone, PartialEq)]
pub struct FaultReporter {
    report: Callback<FaultInfo>,
}

impl FaultReporter {
    pub fn report(&self, info: FaultInfo) {
        self.report.emit(info);
    }
}

/// Outside a boundary faults are only logged.
#[hook]
pub fn use_fault_reporter() -> FaultReporter {
    use_context::<FaultReporter>().unwrap_or_else(|| FaultReporter {
        report: Callback::from(|info: FaultInfo| {
            log::error!("Unhandled fault outside a boundary: {}", info.message);
        }),
    })
}

async fn send_fault_report(info: FaultInfo) {
    let request = match Request::post(&config::api_url("/api/client-errors")).json(&info) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Could not encode fault report: {}", e);
            return;
        }
    };
    if let Err(e) = request.send().await {
        log::warn!("Could not deliver fault report: {}", e);
    }
}

#[derive(Properties, PartialEq)]
pub struct FaultBoundaryProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(FaultBoundary)]
pub fn fault_boundary(props: &FaultBoundaryProps) -> Html {
    let state = use_reducer_eq(FaultState::default);
    let navigator = use_navigator();
    let route = use_location().map(|location| location.path().to_string());

    let reporter = {
        let dispatcher = state.dispatcher();
        use_memo(
            move |_| FaultReporter {
                report: Callback::from(move |info: FaultInfo| dispatcher.dispatch(FaultAction::Fault(info))),
            },
            (),
        )
    };

    {
        let route = route.clone();
        use_effect_with_deps(
            move |state: &FaultState| {
                if let FaultState::Faulted(info) = state {
                    let mut info = info.clone();
                    info.route = info.route.or(route);
                    log::error!("Fault in {:?}: {}", info.component, info.message);
                    wasm_bindgen_futures::spawn_local(send_fault_report(info));
                }
                || ()
            },
            (*state).clone(),
        );
    }

    if state.is_faulted() {
        let retry = {
            let state = state.clone();
            Callback::from(move |_: MouseEvent| state.dispatch(FaultAction::Reset))
        };
        let go_home = {
            let state = state.clone();
            Callback::from(move |_: MouseEvent| {
                state.dispatch(FaultAction::Reset);
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::Home);
                }
            })
        };

        return html! {
            <section class="fault-panel" role="alert">
                <h2>{"Something went wrong"}</h2>
                <p>{"This part of the page failed to load. You can try again or head back home."}</p>
                <div class="fault-panel__actions">
                    <button class="button button--primary" onclick={retry}>{"Retry"}</button>
                    <button class="button button--ghost" onclick={go_home}>{"Go home"}</button>
                </div>
            </section>
        };
    }

    html! {
        <ContextProvider<FaultReporter> context={(*reporter).clone()}>
            { for props.children.iter() }
        </ContextProvider<FaultReporter>>
    }
}

const PANIC_PAGE: &str = r#"<main class="fault-page" role="alert">
  <h1>Something went wrong</h1>
  <p>The page stopped working. Reloading usually fixes it.</p>
  <button class="button button--primary" onclick="window.location.reload()">Retry</button>
</main>"#;

/// After a panic the Yew app is unusable, so the whole body is replaced with
/// a static panel that can only reload.
pub fn install_panic_page() {
    std::panic::set_hook(Box::new(|info| {
        console_error_panic_hook::hook(info);
        if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
            body.set_inner_html(PANIC_PAGE);
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(message: &str) -> FaultInfo {
        FaultInfo::new("ContactForm", message)
    }

    #[test]
    fn first_fault_is_kept() {
        let state = FaultState::Ok.fault(info("first")).fault(info("second"));
        assert_eq!(state, FaultState::Faulted(info("first")));
    }

    #[test]
    fn reset_returns_to_ok() {
        let state = FaultState::Ok.fault(info("boom")).reset();
        assert_eq!(state, FaultState::Ok);
        assert!(!state.is_faulted());
    }

    #[test]
    fn reducer_reuses_state_for_repeat_faults() {
        let faulted = Rc::new(FaultState::Ok).reduce(FaultAction::Fault(info("first")));
        let again = faulted.clone().reduce(FaultAction::Fault(info("second")));
        assert!(Rc::ptr_eq(&faulted, &again));
        assert_eq!(again.reduce(FaultAction::Reset).as_ref(), &FaultState::Ok);
    }

    #[test]
    fn report_payload_omits_missing_fields() {
        let payload = serde_json::to_value(FaultInfo {
            message: "boom".to_string(),
            component: None,
            route: None,
        })
        .unwrap();
        assert_eq!(payload, serde_json::json!({ "message": "boom" }));
    }
}
