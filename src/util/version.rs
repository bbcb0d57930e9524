pub const APP_NAME: &str = "Calculadora de Preço de Venda";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

/// Version string shown in the footer: the git tag when the build had one,
/// the Cargo version otherwise.
pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{APP_VERSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_to_the_cargo_version() {
        let label = version_label();
        assert!(label.starts_with('v') || GIT_TAG.is_some());
    }
}
