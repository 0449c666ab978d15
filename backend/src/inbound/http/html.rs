//! Server-rendered page markup.
//!
//! Builds the whole document from a [`ViewState`] using the domain's pure
//! render decisions. Every user-derived string passes through [`escape`].

use crate::domain::{
    FormControls, LOADING_TEXT, PLACEHOLDER_TEXT, Presentation, ResultCard, ViewState,
    form_controls, present,
};

/// Page title and brand.
pub const PAGE_TITLE: &str = "ConCreds";
/// Line under the title.
pub const TAGLINE: &str = "Check your conceptual credit score instantly.";
/// Placeholder inside the email input.
pub const INPUT_PLACEHOLDER: &str = "Enter email (e.g., aa@aa.com)";

const REFRESH_SECONDS: u8 = 1;
const IMAGE_ALT: &str = "AI generated placeholder";

/// Escape text for use in element content and quoted attribute values.
///
/// # Examples
/// ```
/// use concreds::inbound::http::html::escape;
///
/// assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
/// ```
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render the full page for a viewer.
#[must_use]
pub fn render_page(state: &ViewState) -> String {
    let refresh = if state.is_loading() {
        format!("  <meta http-equiv=\"refresh\" content=\"{REFRESH_SECONDS}\"/>\n")
    } else {
        String::new()
    };
    let form = render_form(&form_controls(state));
    let result = render_result(&present(state));

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\"/>\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n\
         {refresh}  <title>{PAGE_TITLE}</title>\n</head>\n\
         <body class=\"min-h-screen bg-gray-900 text-gray-100\">\n\
         <main class=\"mx-auto max-w-md p-6\">\n  \
         <h1 class=\"text-3xl font-bold\">{PAGE_TITLE}</h1>\n  \
         <p class=\"text-gray-400\">{TAGLINE}</p>\n\
         {form}{result}</main>\n</body>\n</html>\n"
    )
}

fn render_form(controls: &FormControls) -> String {
    let disabled = if controls.disabled { " disabled" } else { "" };
    format!(
        "  <form method=\"post\" action=\"/check\" class=\"mt-6 flex gap-2\">\n    \
         <input type=\"email\" name=\"email\" value=\"{value}\" placeholder=\"{INPUT_PLACEHOLDER}\"\
         {disabled}/>\n    \
         <button type=\"submit\"{disabled}>{label}</button>\n  </form>\n",
        value = escape(&controls.value),
        label = controls.submit_label,
    )
}

fn render_result(presentation: &Presentation) -> String {
    let inner = match presentation {
        Presentation::Placeholder => {
            format!("    <p class=\"text-gray-500\">{PLACEHOLDER_TEXT}</p>\n")
        }
        Presentation::Loading => format!(
            "    <div class=\"animate-pulse\" role=\"status\">{LOADING_TEXT}</div>\n"
        ),
        Presentation::ErrorBanner { message } => format!(
            "    <div class=\"rounded border border-red-500/30 text-red-400\" role=\"alert\">\
             {}</div>\n",
            escape(message)
        ),
        Presentation::ResultCard(card) => render_card(card),
    };
    format!("  <section id=\"result\" class=\"mt-6\">\n{inner}  </section>\n")
}

fn render_card(card: &ResultCard) -> String {
    format!(
        "    <article class=\"rounded border {border}\">\n      \
         <img src=\"{image}\" alt=\"{IMAGE_ALT}\" width=\"500\" height=\"300\"/>\n      \
         <p class=\"text-sm text-gray-400\">Name</p>\n      \
         <h2 class=\"text-xl font-bold\">{name}</h2>\n      \
         <p class=\"text-sm text-gray-400\">Email</p>\n      \
         <p class=\"text-gray-300\">{email}</p>\n      \
         <p class=\"text-sm text-gray-400\">Credit Score</p>\n      \
         <span class=\"rounded-full px-4 {badge}\">{label}</span>\n    </article>\n",
        border = card.palette.border_class,
        badge = card.palette.status_class,
        image = escape(&card.image_url),
        name = escape(&card.name),
        email = escape(&card.email),
        label = card.status.label(),
    )
}
