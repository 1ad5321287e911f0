//! Plans and one-off reports offered on the landing page.

use super::cart::CartItem;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offering {
    pub id: &'static str,
    pub name: &'static str,
    /// USD per billing period, or per unit for one-off items.
    pub price: f64,
    pub category: &'static str,
    pub duration: Option<&'static str>,
    pub blurb: &'static str,
    pub features: &'static [&'static str],
    pub featured: bool,
}

impl Offering {
    pub fn to_cart_item(&self) -> CartItem {
        let item = CartItem::new(self.id, self.name, self.price).with_category(self.category);
        match self.duration {
            Some(duration) => item.with_duration(duration),
            None => item,
        }
    }
}

pub const PLANS: &[Offering] = &[
    Offering {
        id: "plan-starter",
        name: "Starter",
        price: 29.0,
        category: "Subscription",
        duration: Some("monthly"),
        blurb: "For occasional importers testing new suppliers.",
        features: &["50 HS lookups / month", "Rate comparison", "Landed cost calculator"],
        featured: false,
    },
    Offering {
        id: "plan-professional",
        name: "Professional",
        price: 99.0,
        category: "Subscription",
        duration: Some("monthly"),
        blurb: "For growing teams shipping every week.",
        features: &[
            "Unlimited HS lookups",
            "Sanctions screening",
            "Carbon and risk reports",
            "Compliance assistant",
        ],
        featured: true,
    },
    Offering {
        id: "plan-enterprise",
        name: "Enterprise",
        price: 999.0,
        category: "Subscription",
        duration: Some("yearly"),
        blurb: "For brokers and forwarders managing many clients.",
        features: &["Everything in Professional", "Multi-user workspace", "Priority support"],
        featured: false,
    },
];

pub const REPORTS: &[Offering] = &[
    Offering {
        id: "report-hs-review",
        name: "HS Classification Review",
        price: 49.0,
        category: "Report",
        duration: None,
        blurb: "A licensed broker double-checks one tariff classification.",
        features: &[],
        featured: false,
    },
    Offering {
        id: "report-market-entry",
        name: "Market Entry Brief",
        price: 149.0,
        category: "Report",
        duration: None,
        blurb: "Duties, documents and restrictions for one product and market.",
        features: &[],
        featured: false,
    },
];

pub fn find(id: &str) -> Option<&'static Offering> {
    PLANS.iter().chain(REPORTS).find(|offering| offering.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_becomes_subscription_item() {
        let item = find("plan-professional").unwrap().to_cart_item();
        assert_eq!(item.price, 99.0);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.duration.as_deref(), Some("monthly"));
        assert_eq!(item.category.as_deref(), Some("Subscription"));
    }

    #[test]
    fn reports_have_no_duration_and_ids_are_unique() {
        assert!(find("report-hs-review").unwrap().to_cart_item().duration.is_none());
        let mut ids: Vec<_> = PLANS.iter().chain(REPORTS).map(|o| o.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(PLANS.iter().chain(REPORTS).all(|o| o.price > 0.0));
    }
}
