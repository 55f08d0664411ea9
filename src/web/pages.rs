//! Built-in HTML for the portal, used when no template file overrides it.

use piso_shared::board_config::BoardConfig;
use std::path::Path;

pub const CLIENT_PORTAL_TEMPLATE: &str = "client_portal.html";
pub const ADMIN_TEMPLATE: &str = "admin.html";
pub const ADMIN_LOGIN_TEMPLATE: &str = "admin_login.html";

const BASE_STYLE: &str = "body{margin:0;font-family:system-ui,-apple-system,Segoe UI,Roboto,Helvetica,Arial,sans-serif;background:#f5f6fa;color:#2d3436} \
.card{margin:16px auto;background:#fff;border-radius:12px;box-shadow:0 4px 6px rgba(0,0,0,.1);overflow:hidden} \
.head{padding:12px 16px;border-bottom:1px solid #eee;font-weight:700} .content{padding:16px} .row{margin:8px 0}";

/// Read `dir/name` if an operator dropped a custom page there.
pub async fn load_template(dir: &Path, name: &str) -> Option<String> {
    let path = dir.join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Some(body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!("Template {} unreadable, using built-in page: {}", path.display(), e);
            None
        }
    }
}

/// Escape text for HTML element and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

fn board_row(board: &BoardConfig) -> String {
    format!(
        "<div class='row'>Board: {} ({})</div>",
        escape_html(board.name),
        escape_html(board.id)
    )
}

fn page(title: &str, max_width: u32, extra_style: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta name='viewport' content='width=device-width, initial-scale=1.0'>\
<title>{title}</title><style>{BASE_STYLE} .card{{max-width:{max_width}px}} {extra_style}</style></head><body>{body}</body></html>"
    )
}

fn notice(title: &str, lines: &[String]) -> String {
    let mut body = format!("<h1>{title}</h1>");
    for line in lines {
        body.push_str(&format!("<p>{line}</p>"));
    }
    body.push_str("<a href='/'>Back to portal</a>");
    format!("<!DOCTYPE html><html><head><title>{title}</title></head><body>{body}</body></html>")
}

pub fn client_portal(board: &BoardConfig) -> String {
    let style = ".btn{display:block;width:100%;padding:12px;border:none;border-radius:8px;background:#2ecc71;color:#fff;font-weight:700} \
.input{flex:1;padding:10px;border:1px solid #ddd;border-radius:8px} \
.submit{padding:10px 16px;border:none;border-radius:8px;background:#3498db;color:#fff;font-weight:700}";
    let body = format!(
        "<div class='card'><div class='head'>Piso WiFi Client Portal</div><div class='content'>{}\
<div class='row'><form method='POST' action='/insert-coin'><button class='btn' type='submit'>Insert Coin</button></form></div>\
<div class='row'><form method='POST' action='/voucher' style='display:flex;gap:8px;width:100%'>\
<input class='input' name='code' placeholder='Enter Voucher Code...' autofocus><button class='submit' type='submit'>Submit</button></form></div>\
</div></div>",
        board_row(board)
    );
    page("Piso WiFi Portal", 360, style, &body)
}

pub fn voucher_submitted(code: &str) -> String {
    notice(
        "Voucher Submitted",
        &[
            format!("Code: {}", escape_html(code)),
            "Voucher validation and time credit logic is not implemented yet.".to_string(),
        ],
    )
}

pub fn coin_registered(board: &BoardConfig) -> String {
    let line = if board.has_gpio {
        format!("Coin received. Relay on GPIO {} energized.", board.pins.relay_pin)
    } else {
        "A simulated coin insert was received.".to_string()
    };
    notice("Coin Registered", &[line])
}

pub fn admin_portal(board: &BoardConfig) -> String {
    let style = ".btn{display:inline-block;padding:10px 14px;border:none;border-radius:10px;background:#2563eb;color:#fff;font-weight:700;text-decoration:none}";
    let mode = if board.has_gpio { "GPIO" } else { "simulation" };
    let body = format!(
        "<div class='card'><div class='head'>Piso WiFi Admin</div><div class='content'>{}\
<div class='row'>Relay: pin {} active {} ({mode})</div>\
<div class='row'><a class='btn' href='/admin/status'>View JSON Status</a> <a class='btn' href='/'>Client Portal</a> \
<a class='btn' href='/admin/logout'>Sign Out</a></div></div></div>",
        board_row(board),
        board.pins.relay_pin,
        board.pins.relay_active,
    );
    page("Piso WiFi Admin", 720, style, &body)
}

pub fn admin_login() -> String {
    let style = ".field{margin:8px 0} .input{width:100%;padding:10px;border:1px solid #ddd;border-radius:8px} \
.btn{width:100%;padding:12px;border:none;border-radius:10px;background:#2563eb;color:#fff;font-weight:700;margin-top:8px}";
    let body = "<div class='card'><div class='head'>Admin Login</div><div class='content'>\
<form method='POST' action='/admin/login'><div class='field'><input class='input' name='username' placeholder='Username' autofocus></div>\
<div class='field'><input class='input' name='password' type='password' placeholder='Password'></div>\
<button class='btn' type='submit'>Sign In</button></form></div></div>";
    page("Admin Login", 360, style, body)
}
