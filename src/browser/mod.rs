use anyhow::{Context, Result};

use crate::scoring::RoundOutcome;

/// Open a round's results page in the user's default browser
///
/// # Errors
/// Returns error if the round has no results page or the browser cannot
/// be opened (e.g., no browser available)
pub fn open_round_page(outcome: &RoundOutcome) -> Result<&str> {
    let url = round_page_url(outcome)
        .with_context(|| format!("Round '{}' has no results page", outcome.name))?;
    webbrowser::open(url).with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(url)
}

fn round_page_url(outcome: &RoundOutcome) -> Option<&str> {
    outcome
        .gg_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
}
