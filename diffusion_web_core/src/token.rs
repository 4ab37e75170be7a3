use diffusion_rs_core::TokenSource;

/// Environment variable holding the Hugging Face token for gated repositories.
pub const HF_TOKEN_VAR: &str = "HF_TOKEN";

/// Pick the credential used for model downloads.
///
/// An explicit literal token wins. Otherwise the `HF_TOKEN` environment
/// variable is used when it is set and non-empty, and no credential is
/// attached at all when it is not.
pub fn resolve_token_source(explicit: Option<String>) -> TokenSource {
    if let Some(token) = explicit {
        return TokenSource::Literal(token);
    }
    match std::env::var(HF_TOKEN_VAR) {
        Ok(value) if !value.trim().is_empty() => TokenSource::EnvVar(HF_TOKEN_VAR.to_string()),
        _ => TokenSource::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The three cases share one test because they mutate the same process-wide
    // environment variable and cargo runs tests in parallel threads.
    #[test]
    fn token_resolution_follows_environment() {
        std::env::remove_var(HF_TOKEN_VAR);
        assert!(matches!(resolve_token_source(None), TokenSource::None));

        std::env::set_var(HF_TOKEN_VAR, "  ");
        assert!(matches!(resolve_token_source(None), TokenSource::None));

        std::env::set_var(HF_TOKEN_VAR, "hf_secret");
        assert!(
            matches!(resolve_token_source(None), TokenSource::EnvVar(var) if var == HF_TOKEN_VAR)
        );

        // An explicit literal beats the environment.
        assert!(matches!(
            resolve_token_source(Some("hf_other".to_string())),
            TokenSource::Literal(token) if token == "hf_other"
        ));

        std::env::remove_var(HF_TOKEN_VAR);
    }
}
