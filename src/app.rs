use dioxus::{prelude::*, signals::Signal};

use crate::{
    config::{self, AppConfig},
    domain::AppState,
    infra::account::AccountClient,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{
            AccountPage, CarbonPage, CartPage, ClassifierPage, CompliancePage, HomePage,
            LandedCostPage, NotFoundPage, RatesPage, RiskPage, SettingsPage,
        },
        shell::Shell,
    },
    util::{
        assets,
        persistence::{default_store, load_persisted_state, save_persisted_state, SharedStore},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/cart")]
    Cart {},
    #[route("/classify")]
    Classify {},
    #[route("/rates")]
    Rates {},
    #[route("/landed-cost")]
    LandedCost {},
    #[route("/carbon")]
    Carbon {},
    #[route("/risk")]
    Risk {},
    #[route("/compliance")]
    Compliance {},
    #[route("/account")]
    Account {},
    #[route("/settings")]
    Settings {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[component]
pub fn App() -> Element {
    let config = use_context_provider(config::active);
    let store = use_context_provider(default_store);

    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        let store = store.clone();
        move || {
            let saved = load_persisted_state(store.as_ref());
            tracing::debug!(
                items = saved.cart.item_count(),
                currency = %saved.currency,
                signed_in = saved.token.is_some(),
                "restored persisted state"
            );
            state.with_mut(|st| st.apply_persisted(saved));
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    let _profile = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let store = store.clone();
        let config = config.clone();
        move || {
            let state = state.clone();
            let toasts = toasts.clone();
            let store = store.clone();
            let config = config.clone();
            async move { restore_session(state, toasts, store, config).await }
        }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>, store: &SharedStore) {
    let snapshot = state.peek().to_persisted();
    if let Err(err) = save_persisted_state(store.as_ref(), &snapshot) {
        tracing::warn!("failed to persist user state: {err}");
    }
}

pub fn account_client(config: &AppConfig, token: Option<String>) -> Option<AccountClient> {
    match AccountClient::new(config.api_base_url.clone()) {
        Ok(client) => Some(client.with_token(token)),
        Err(err) => {
            tracing::error!("failed to initialise account client: {err}");
            None
        }
    }
}

/// Loads the profile for a token restored from storage.
async fn restore_session(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    store: SharedStore,
    config: AppConfig,
) -> bool {
    // Peek so the resource does not rerun on its own auth writes.
    let token = state.peek().auth.token.clone();
    let Some(token) = token else {
        return false;
    };
    let Some(client) = account_client(&config, Some(token)) else {
        return false;
    };

    state.with_mut(|st| st.auth.begin());
    match client.profile().await {
        Ok(profile) => {
            tracing::info!(user = %profile.username, "restored session");
            state.with_mut(|st| st.auth.profile_loaded(profile.user()));
            true
        }
        Err(err) if err.is_unauthorized() => {
            tracing::info!("stored session expired");
            state.with_mut(|st| st.auth.signed_out());
            persist_user_state(&state, &store);
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Your session expired. Please sign in again.",
            );
            false
        }
        Err(err) => {
            tracing::warn!("failed to restore session: {err}");
            state.with_mut(|st| st.auth.failed(err.user_message()));
            false
        }
    }
}

#[component]
pub fn Home() -> Element {
    rsx! { Shell { HomePage {} } }
}

#[component]
pub fn Cart() -> Element {
    rsx! { Shell { CartPage {} } }
}

#[component]
pub fn Classify() -> Element {
    rsx! { Shell { ClassifierPage {} } }
}

#[component]
pub fn Rates() -> Element {
    rsx! { Shell { RatesPage {} } }
}

#[component]
pub fn LandedCost() -> Element {
    rsx! { Shell { LandedCostPage {} } }
}

#[component]
pub fn Carbon() -> Element {
    rsx! { Shell { CarbonPage {} } }
}

#[component]
pub fn Risk() -> Element {
    rsx! { Shell { RiskPage {} } }
}

#[component]
pub fn Compliance() -> Element {
    rsx! { Shell { CompliancePage {} } }
}

#[component]
pub fn Account() -> Element {
    rsx! { Shell { AccountPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! { Shell { NotFoundPage { path } } }
}
