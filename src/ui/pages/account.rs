use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::{
    app::{account_client, persist_user_state, Route},
    config::AppConfig,
    domain::AppState,
    infra::account::{
        AccountClient, AccountError, Address, LoginRequest, ProfileUpdate, RegisterRequest,
        Session, Subscription,
    },
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        forms::require_text,
        theme,
    },
    util::persistence::SharedStore,
};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

#[component]
pub fn AccountPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let signed_in = state.with(|st| st.auth.is_authenticated());
    let restoring = state.with(|st| st.auth.token.is_some() && st.auth.loading);

    rsx! {
        div { class: "mx-auto max-w-3xl space-y-8",
            if signed_in {
                AccountDashboard {}
            } else if restoring {
                p { class: "text-sm {theme::TEXT_MUTED}", "Restoring your session…" }
            } else {
                AuthForms {}
            }
        }
    }
}

#[component]
fn AuthForms() -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<SharedStore>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let config = use_context::<AppConfig>();

    let mut mode = use_signal(|| AuthMode::Login);
    let mut email = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);

    let (loading, auth_error) = state.with(|st| (st.auth.loading, st.auth.error.clone()));

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = mode();
        let credentials = match validate_credentials(current, &email(), &username(), &password()) {
            Ok(credentials) => credentials,
            Err(message) => {
                form_error.set(Some(message));
                return;
            }
        };
        form_error.set(None);
        let Some(client) = account_client(&config, None) else {
            push_toast(toasts.clone(), ToastKind::Error, "Account service is not configured.");
            return;
        };

        let mut state = state.clone();
        let store = store.clone();
        let toasts = toasts.clone();
        spawn(async move {
            state.with_mut(|st| st.auth.begin());
            match sign_in(&client, current, credentials).await {
                Ok(session) => {
                    tracing::info!(user = %session.user.username, "signed in");
                    let name = session.user.username.clone();
                    state.with_mut(|st| st.auth.signed_in(session.user, session.token));
                    persist_user_state(&state, &store);
                    password.set(String::new());
                    push_toast(toasts, ToastKind::Success, format!("Welcome, {name}."));
                }
                Err(err) => {
                    tracing::warn!("sign-in failed: {err}");
                    let message = err.user_message();
                    state.with_mut(|st| st.auth.failed(message.clone()));
                    push_toast(toasts, ToastKind::Error, message);
                }
            }
        });
    };

    let is_register = mode() == AuthMode::Register;

    rsx! {
        section { class: "{theme::PANEL}",
            div { class: "flex gap-2",
                button {
                    class: theme::toggle_button(!is_register),
                    onclick: move |_| mode.set(AuthMode::Login),
                    "Sign in"
                }
                button {
                    class: theme::toggle_button(is_register),
                    onclick: move |_| mode.set(AuthMode::Register),
                    "Create account"
                }
            }
            form { class: "mt-6 space-y-4", onsubmit: on_submit,
                div {
                    label { class: "{theme::LABEL}", "Email" }
                    input { class: "{theme::INPUT}", r#type: "email", autocomplete: "email", value: email(), oninput: move |evt| email.set(evt.value()) }
                }
                if is_register {
                    div {
                        label { class: "{theme::LABEL}", "Username" }
                        input { class: "{theme::INPUT}", autocomplete: "username", value: username(), oninput: move |evt| username.set(evt.value()) }
                    }
                }
                div {
                    label { class: "{theme::LABEL}", "Password" }
                    input { class: "{theme::INPUT}", r#type: "password", value: password(), oninput: move |evt| password.set(evt.value()) }
                }
                if let Some(message) = form_error().or(auth_error) {
                    p { class: "{theme::ERROR_TEXT}", "{message}" }
                }
                button {
                    class: "{theme::BUTTON_PRIMARY}",
                    r#type: "submit",
                    disabled: loading,
                    if loading { "Please wait…" } else if is_register { "Create account" } else { "Sign in" }
                }
            }
        }
    }
}

struct Credentials {
    email: String,
    username: String,
    password: String,
}

fn validate_credentials(
    mode: AuthMode,
    email: &str,
    username: &str,
    password: &str,
) -> Result<Credentials, String> {
    let email = require_text(email, "Email")?;
    if !email.contains('@') {
        return Err("Enter a valid email address".into());
    }
    if password.is_empty() {
        return Err("Password is required".into());
    }
    let username = match mode {
        AuthMode::Login => String::new(),
        AuthMode::Register => {
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters"
                ));
            }
            require_text(username, "Username")?
        }
    };
    Ok(Credentials {
        email,
        username,
        password: password.to_string(),
    })
}

/// Registration has no token in its response, so it is followed by a login.
async fn sign_in(
    client: &AccountClient,
    mode: AuthMode,
    credentials: Credentials,
) -> Result<Session, AccountError> {
    if mode == AuthMode::Register {
        let user = client
            .register(&RegisterRequest {
                email: credentials.email.clone(),
                username: credentials.username,
                password: credentials.password.clone(),
            })
            .await?;
        tracing::info!(user = %user.username, "registered account");
    }
    client
        .login(&LoginRequest {
            email: credentials.email,
            password: credentials.password,
        })
        .await
}

#[component]
fn AccountDashboard() -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<SharedStore>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let config = use_context::<AppConfig>();
    let nav = use_navigator();

    let display_name = state.with(|st| st.auth.display_name().unwrap_or_default().to_string());
    let email = state.with(|st| {
        st.auth
            .user
            .as_ref()
            .map(|user| user.email.clone())
            .unwrap_or_default()
    });

    let on_logout = move |_| {
        let token = state.peek().auth.token.clone();
        let client = account_client(&config, token);
        let mut state = state.clone();
        let store = store.clone();
        let toasts = toasts.clone();
        spawn(async move {
            if let Some(client) = client {
                // The local session is dropped even if the server call fails.
                if let Err(err) = client.logout().await {
                    tracing::warn!("logout request failed: {err}");
                }
            }
            state.with_mut(|st| st.auth.signed_out());
            persist_user_state(&state, &store);
            push_toast(toasts, ToastKind::Info, "Signed out.");
            nav.push(Route::Home {});
        });
    };

    rsx! {
        div { class: "flex items-center justify-between",
            div {
                h2 { class: "text-2xl font-semibold text-slate-100", "{display_name}" }
                p { class: "text-sm {theme::TEXT_MUTED}", "{email}" }
            }
            button { class: "{theme::BUTTON_SECONDARY}", onclick: on_logout, "Sign out" }
        }
        ProfilePanel {}
        AddressPanel {}
        SubscriptionPanel {}
    }
}

/// Client carrying the current session token.
fn session_client(state: &Signal<AppState>, config: &AppConfig) -> Option<AccountClient> {
    account_client(config, state.peek().auth.token.clone())
}

/// Signs out on 401 so the auth forms come back; other errors become toasts.
fn report_account_error(
    mut state: Signal<AppState>,
    store: &SharedStore,
    toasts: Signal<Vec<ToastMessage>>,
    action: &str,
    err: AccountError,
) {
    if err.is_unauthorized() {
        tracing::info!("session rejected while trying to {action}");
        state.with_mut(|st| st.auth.signed_out());
        persist_user_state(&state, store);
        push_toast(toasts, ToastKind::Info, "Your session expired. Please sign in again.");
    } else {
        tracing::warn!("failed to {action}: {err}");
        push_toast(toasts, ToastKind::Error, err.user_message());
    }
}

#[component]
fn ProfilePanel() -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<SharedStore>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let config = use_context::<AppConfig>();

    let mut full_name = use_signal(String::new);
    let mut company = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let loaded = use_resource({
        let config = config.clone();
        let store = store.clone();
        move || {
            let client = session_client(&state, &config);
            let store = store.clone();
            async move {
                let client = client?;
                match client.profile().await {
                    Ok(profile) => {
                        full_name.set(profile.full_name.clone().unwrap_or_default());
                        company.set(profile.company.clone().unwrap_or_default());
                        phone.set(profile.phone.clone().unwrap_or_default());
                        Some(())
                    }
                    Err(err) => {
                        report_account_error(state, &store, toasts, "load profile", err);
                        None
                    }
                }
            }
        }
    });

    let on_save = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(client) = session_client(&state, &config) else {
            return;
        };
        let update = profile_update(&full_name(), &company(), &phone());
        let mut state = state.clone();
        let store = store.clone();
        saving.set(true);
        spawn(async move {
            match client.update_profile(&update).await {
                Ok(profile) => {
                    state.with_mut(|st| st.auth.profile_loaded(profile.user()));
                    push_toast(toasts, ToastKind::Success, "Profile saved.");
                }
                Err(err) => report_account_error(state, &store, toasts, "save profile", err),
            }
            saving.set(false);
        });
    };

    let ready = matches!(*loaded.read(), Some(Some(())));

    rsx! {
        section { class: "{theme::PANEL}",
            h2 { class: "{theme::PANEL_TITLE}", "Profile" }
            if !ready {
                p { class: "mt-3 text-sm {theme::TEXT_MUTED}", "Loading profile…" }
            }
            form { class: "mt-4 grid gap-4 sm:grid-cols-3", onsubmit: on_save,
                div {
                    label { class: "{theme::LABEL}", "Full name" }
                    input { class: "{theme::INPUT}", value: full_name(), oninput: move |evt| full_name.set(evt.value()) }
                }
                div {
                    label { class: "{theme::LABEL}", "Company" }
                    input { class: "{theme::INPUT}", value: company(), oninput: move |evt| company.set(evt.value()) }
                }
                div {
                    label { class: "{theme::LABEL}", "Phone" }
                    input { class: "{theme::INPUT}", r#type: "tel", value: phone(), oninput: move |evt| phone.set(evt.value()) }
                }
                div { class: "sm:col-span-3",
                    button { class: "{theme::BUTTON_PRIMARY}", r#type: "submit", disabled: saving() || !ready, "Save profile" }
                }
            }
        }
    }
}

fn optional_field(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn profile_update(full_name: &str, company: &str, phone: &str) -> ProfileUpdate {
    ProfileUpdate {
        username: None,
        full_name: optional_field(full_name),
        company: optional_field(company),
        phone: optional_field(phone),
    }
}

#[component]
fn AddressPanel() -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<SharedStore>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let config = use_context::<AppConfig>();

    let mut address = use_signal(Address::default);
    let mut saving = use_signal(|| false);

    let _loaded = use_resource({
        let config = config.clone();
        let store = store.clone();
        move || {
            let client = session_client(&state, &config);
            let store = store.clone();
            async move {
                let Some(client) = client else {
                    return;
                };
                match client.address().await {
                    Ok(found) => address.set(found),
                    Err(err) => report_account_error(state, &store, toasts, "load address", err),
                }
            }
        }
    });

    let on_save = move |evt: FormEvent| {
        evt.prevent_default();
        let current = address();
        if current.is_blank() {
            push_toast(toasts, ToastKind::Warning, "Fill in the address before saving.");
            return;
        }
        let Some(client) = session_client(&state, &config) else {
            return;
        };
        let store = store.clone();
        saving.set(true);
        spawn(async move {
            match client.update_address(&current).await {
                Ok(saved) => {
                    address.set(saved);
                    push_toast(toasts, ToastKind::Success, "Address saved.");
                }
                Err(err) => report_account_error(state, &store, toasts, "save address", err),
            }
            saving.set(false);
        });
    };

    let current = address();

    rsx! {
        section { class: "{theme::PANEL}",
            h2 { class: "{theme::PANEL_TITLE}", "Shipping address" }
            form { class: "mt-4 grid gap-4 sm:grid-cols-2", onsubmit: on_save,
                div { class: "sm:col-span-2",
                    label { class: "{theme::LABEL}", "Address line 1" }
                    input { class: "{theme::INPUT}", value: current.line1, oninput: move |evt| address.with_mut(|a| a.line1 = evt.value()) }
                }
                div { class: "sm:col-span-2",
                    label { class: "{theme::LABEL}", "Address line 2" }
                    input { class: "{theme::INPUT}", value: current.line2, oninput: move |evt| address.with_mut(|a| a.line2 = evt.value()) }
                }
                div {
                    label { class: "{theme::LABEL}", "City" }
                    input { class: "{theme::INPUT}", value: current.city, oninput: move |evt| address.with_mut(|a| a.city = evt.value()) }
                }
                div {
                    label { class: "{theme::LABEL}", "Province / state" }
                    input { class: "{theme::INPUT}", value: current.region, oninput: move |evt| address.with_mut(|a| a.region = evt.value()) }
                }
                div {
                    label { class: "{theme::LABEL}", "Postal code" }
                    input { class: "{theme::INPUT}", value: current.postal_code, oninput: move |evt| address.with_mut(|a| a.postal_code = evt.value()) }
                }
                div {
                    label { class: "{theme::LABEL}", "Country" }
                    input { class: "{theme::INPUT}", value: current.country, oninput: move |evt| address.with_mut(|a| a.country = evt.value()) }
                }
                div { class: "sm:col-span-2",
                    button { class: "{theme::BUTTON_PRIMARY}", r#type: "submit", disabled: saving(), "Save address" }
                }
            }
        }
    }
}

#[component]
fn SubscriptionPanel() -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<SharedStore>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let config = use_context::<AppConfig>();
    let nav = use_navigator();

    let subscription = use_resource(move || {
        let client = session_client(&state, &config);
        let store = store.clone();
        async move {
            let client = client?;
            match client.subscription().await {
                Ok(found) => Some(found),
                Err(err) => {
                    report_account_error(state, &store, toasts, "load subscription", err);
                    None
                }
            }
        }
    });

    let body = match &*subscription.read() {
        None => rsx! { p { class: "mt-3 text-sm {theme::TEXT_MUTED}", "Loading subscription…" } },
        Some(None) => rsx! { p { class: "mt-3 {theme::ERROR_TEXT}", "Subscription details are unavailable." } },
        Some(Some(found)) => rsx! { SubscriptionDetails { subscription: found.clone() } },
    };

    rsx! {
        section { class: "{theme::PANEL}",
            div { class: "flex items-center justify-between",
                h2 { class: "{theme::PANEL_TITLE}", "Subscription" }
                button { class: "{theme::BUTTON_GHOST}", onclick: move |_| { nav.push(Route::Home {}); }, "View plans" }
            }
            {body}
        }
    }
}

#[component]
fn SubscriptionDetails(subscription: Subscription) -> Element {
    let badge = if subscription.is_active() {
        "rounded-full bg-emerald-500/20 px-2 py-0.5 text-xs font-semibold text-emerald-200"
    } else {
        "rounded-full bg-slate-700 px-2 py-0.5 text-xs font-semibold text-slate-300"
    };
    let renewal = renewal_label(subscription.renews_at);

    rsx! {
        div { class: "mt-4 flex items-center gap-3",
            span { class: "text-lg font-semibold text-slate-100", "{subscription.plan}" }
            span { class: badge, "{subscription.status}" }
        }
        p { class: "mt-1 text-sm {theme::TEXT_MUTED}", "{renewal}" }
    }
}

fn renewal_label(renews_at: Option<OffsetDateTime>) -> String {
    match renews_at {
        Some(at) => format!("Renews on {}", at.date()),
        None => "No renewal scheduled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_needs_email_and_password_only() {
        let creds = validate_credentials(AuthMode::Login, " ops@example.com ", "", "pw").unwrap();
        assert_eq!(creds.email, "ops@example.com");
        assert!(creds.username.is_empty());
        assert!(validate_credentials(AuthMode::Login, "ops", "", "pw").is_err());
        assert!(validate_credentials(AuthMode::Login, "ops@example.com", "", "").is_err());
    }

    #[test]
    fn registration_rules() {
        assert_eq!(
            validate_credentials(AuthMode::Register, "a@b.co", "ops", "short").err(),
            Some("Password must be at least 8 characters".to_string())
        );
        assert!(validate_credentials(AuthMode::Register, "a@b.co", " ", "longenough").is_err());
        let creds = validate_credentials(AuthMode::Register, "a@b.co", "ops", "longenough").unwrap();
        assert_eq!(creds.username, "ops");
    }

    #[test]
    fn blank_profile_fields_are_not_sent() {
        let update = profile_update(" Ada ", "", "  ");
        assert_eq!(update.full_name.as_deref(), Some("Ada"));
        assert_eq!(update.company, None);
        assert_eq!(update.phone, None);
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, serde_json::json!({ "full_name": "Ada" }));
    }

    #[test]
    fn renewal_labels() {
        let at = OffsetDateTime::from_unix_timestamp(1_793_491_200).unwrap();
        assert_eq!(renewal_label(Some(at)), "Renews on 2026-11-01");
        assert_eq!(renewal_label(None), "No renewal scheduled");
    }
}
