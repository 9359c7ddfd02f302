/// Popup UI: accumulated time per site and a reset control

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::chrome::ChromeStorage;
use crate::config::TrackerConfig;
use crate::report::{PopupView, open_view, reset_view};

fn site_storage() -> ChromeStorage {
    ChromeStorage::new(TrackerConfig::default().storage_key)
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| PopupView::Loading);

    // Load site times on open
    {
        let view = view.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                view.set(open_view(&site_storage()).await);
            });
            || ()
        });
    }

    // Reset handler; the tracker's in-memory session keeps running
    let on_reset = {
        let view = view.clone();

        Callback::from(move |_: MouseEvent| {
            let view = view.clone();

            spawn_local(async move {
                view.set(reset_view(&site_storage()).await);
            });
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Site Timer"}</h1>

            if let PopupView::Error(err) = &*view {
                <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                    {err.clone()}
                </Alert>
            }

            <div id="siteList" class="site-list">
                if view.is_loading() {
                    <Spinner />
                }
                {for view.site_list().into_iter().map(|line| html! {
                    <div class="site-line">{line}</div>
                })}
            </div>

            <button
                id="resetButton"
                class="pf-v5-c-button pf-m-danger pf-m-block"
                onclick={on_reset}
                disabled={view.is_loading()}
            >
                {"Reset"}
            </button>
        </div>
    }
}
