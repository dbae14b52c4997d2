use colored::Colorize;

/// Safely truncate a string to a maximum number of characters
fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let trunc_chars = if max_chars >= 3 { max_chars - 3 } else { 0 };
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Log HTTP request details for debugging (console output)
pub fn log_request(
    method: &str,
    url: &str,
    body: Option<&serde_json::Value>,
    token: Option<&str>,
    verbose: bool,
) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "🔍 HTTP REQUEST DEBUG".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan());

    println!("{}: {} {}", "Request".bright_yellow(), method, url);

    println!("\n{}", "Headers:".bright_yellow());
    println!("  Content-Type: application/json");
    if let Some(token) = token {
        println!(
            "  Authorization: Token {}***",
            token.chars().take(8).collect::<String>()
        );
    }

    if let Some(body) = body {
        println!("\n{}", "Request Body:".bright_yellow());
        match serde_json::to_string_pretty(body) {
            Ok(json) => println!("{}", safe_truncate(&json, 2000)),
            Err(e) => println!("{}", format!("Error serializing request: {}", e).red()),
        }
    }

    println!("{}", "═".repeat(80).bright_cyan());
    println!();
}

/// Log HTTP response details for debugging (console output)
pub fn log_response(status: &reqwest::StatusCode, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_green());
    println!("{}", "📥 HTTP RESPONSE DEBUG".bright_green().bold());
    println!("{}", "═".repeat(80).bright_green());

    println!(
        "{}: {} {}",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    println!("\n{}", "Response Body:".bright_yellow());
    // Try to pretty-print JSON, fall back to raw text
    if let Ok(json_val) = serde_json::from_str::<serde_json::Value>(body) {
        match serde_json::to_string_pretty(&json_val) {
            Ok(pretty) => println!("{}", safe_truncate(&pretty, 2000)),
            Err(_) => println!("{}", safe_truncate(body, 2000)),
        }
    } else {
        println!("{}", safe_truncate(body, 2000));
    }

    println!("{}", "═".repeat(80).bright_green());
    println!();
}
