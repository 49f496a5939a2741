//! Browser utilities
//!
//! Functions for opening URLs in the system's default browser.

/// Open a URL in the system's default browser
///
/// Uses platform-specific commands:
/// - macOS: `open`
/// - Linux: `xdg-open`
/// - Windows: `cmd /C start`
///
/// Failure to launch is logged; the caller has already printed the URL.
pub async fn open_url(url: &str) {
    #[cfg(target_os = "macos")]
    let result = tokio::process::Command::new("open").arg(url).spawn();

    #[cfg(target_os = "windows")]
    let result = tokio::process::Command::new("cmd")
        .args(["/C", "start", "", url])
        .spawn();

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let result = tokio::process::Command::new("xdg-open").arg(url).spawn();

    match result {
        Ok(_) => log::debug!("Opened browser for {}", url),
        Err(e) => log::warn!("Failed to open URL in browser: {}", e),
    }
}
