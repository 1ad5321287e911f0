pub const APP_NAME: &str = "TradeDesk";
pub const APP_TAGLINE: &str = "Import/export tools for small traders";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_label() -> String {
    format!("v{APP_VERSION}")
}

pub fn window_title() -> String {
    format!("{APP_NAME} {}", version_label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_carries_package_version() {
        assert_eq!(version_label(), format!("v{}", env!("CARGO_PKG_VERSION")));
        assert!(window_title().starts_with("TradeDesk v"));
    }
}
