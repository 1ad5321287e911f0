use super::{cart::Cart, currency::Currency, session::AuthState};

/// Root state shared through the Dioxus context.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub cart: Cart,
    /// Display currency only; prices stay in USD.
    pub currency: Currency,
    pub auth: AuthState,
}

impl AppState {
    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.cart = persisted.cart;
        self.currency = persisted.currency;
        self.auth = AuthState::with_token(persisted.token);
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            cart: self.cart.clone(),
            currency: self.currency,
            token: self.auth.token.clone(),
        }
    }

    pub fn format_price(&self, amount_usd: f64) -> String {
        self.currency.format_price(amount_usd)
    }
}

/// Everything that survives a restart. Each field lives under its own
/// storage key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersistedState {
    pub cart: Cart,
    pub currency: Currency,
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartItem;

    #[test]
    fn persisted_round_trip() {
        let mut state = AppState::default();
        state.cart.add_item(CartItem::new("a", "A", 12.0).with_quantity(2));
        state.currency = Currency::Eur;
        state.auth.token = Some("tok".into());

        let mut restored = AppState::default();
        restored.apply_persisted(state.to_persisted());

        assert_eq!(restored.cart, state.cart);
        assert_eq!(restored.currency, Currency::Eur);
        assert_eq!(restored.auth.token.as_deref(), Some("tok"));
        assert!(restored.auth.user.is_none());
        assert_eq!(restored.format_price(100.0), "€92.00");
    }

    #[test]
    fn switching_currency_leaves_usd_prices_alone() {
        let mut state = AppState::default();
        state.cart.add_item(CartItem::new("plan-pro", "Pro", 99.0));
        state.cart.add_item(CartItem::new("report", "Report", 49.5).with_quantity(3));
        let prices: Vec<f64> = state.cart.items().iter().map(|item| item.price).collect();
        let totals = state.cart.totals();
        let saved_cart = state.to_persisted().cart;

        for next in Currency::ALL.into_iter().chain([Currency::Usd]) {
            state.currency = next;
            let _ = state.format_price(totals.total);

            let now: Vec<f64> = state.cart.items().iter().map(|item| item.price).collect();
            assert_eq!(now, prices, "prices changed under {next}");
            assert_eq!(state.cart.totals(), totals);
            let persisted = state.to_persisted();
            assert_eq!(persisted.cart, saved_cart);
            assert_eq!(persisted.currency, next);
        }
        assert_eq!(state.cart.subtotal(), 99.0 + 49.5 * 3.0);
    }
}
