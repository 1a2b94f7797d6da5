//! Startup banner and URL display

use super::config::is_all_interfaces;
use super::constants::APP_NAME;

/// Label column width
const W: usize = 12;

/// Print the startup banner with URLs
pub fn print_banner(host: &str, port: u16, prometheus_url: &str) {
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };
    let base = format!("http://{}:{}", display_host, port);

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "API:",
        terminal_link(&base)
    );
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "Docs:",
        terminal_link(&format!("{}/api/docs", base))
    );
    println!(
        "  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "Prometheus:", prometheus_url
    );
    if host == "127.0.0.1" || host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }
    println!();
}

/// Wrap a URL in an OSC 8 hyperlink when stdout supports it
fn terminal_link(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        format!("\x1b]8;;{}\x07\x1b[36m{}\x1b[0m\x1b]8;;\x07", url, url)
    } else {
        format!("\x1b[36m{}\x1b[0m", url)
    }
}
