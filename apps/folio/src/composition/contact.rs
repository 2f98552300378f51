//! Contact redaction and presentation.
//!
//! `contact_display_text` is the single redaction rule set; every surface that
//! lists contact accounts (résumé header, footer) must go through it.

use serde::Serialize;

use crate::composition::state::ContactAccount;

pub const EMAIL_ON_REQUEST: &str = "Email available on request";
pub const PHONE_ON_REQUEST: &str = "Phone available on request";
pub const FULL_CONTACT_ON_REQUEST: &str = "Full contact available on request";

const MAILTO: &str = "mailto:";
const TEL: &str = "tel:";

/// Display text for an account, first matching rule wins:
///
/// 1. `mailto:` link, unauthenticated → [`EMAIL_ON_REQUEST`]
/// 2. `tel:` link, unauthenticated → [`PHONE_ON_REQUEST`]
/// 3. auth-gated, unauthenticated → placeholder keyed on the account name
/// 4. any other link → normalized link text
/// 5. no link but auth-gated → placeholder keyed on the account name
/// 6. otherwise empty
///
/// Rule 3 holds even when the state still carries the link, e.g. after
/// signing out of a granted session.
pub fn contact_display_text(account: &ContactAccount, authenticated: bool) -> String {
    match account.url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) if !authenticated && strip_scheme(url, MAILTO).is_some() => {
            EMAIL_ON_REQUEST.to_string()
        }
        Some(url) if !authenticated && strip_scheme(url, TEL).is_some() => {
            PHONE_ON_REQUEST.to_string()
        }
        Some(_) if !authenticated && account.requires_auth => on_request_text(&account.name),
        Some(url) => format_url_display(url),
        None if account.requires_auth => on_request_text(&account.name),
        None => String::new(),
    }
}

/// Placeholder for a withheld account, keyed on its name.
fn on_request_text(name: &str) -> String {
    let key = name.to_lowercase();
    if key.contains("email") {
        EMAIL_ON_REQUEST.to_string()
    } else if key.contains("phone") {
        PHONE_ON_REQUEST.to_string()
    } else {
        FULL_CONTACT_ON_REQUEST.to_string()
    }
}

/// Human-readable form of a link: scheme, leading `www.`, query, fragment and
/// trailing slashes removed. `mailto:`/`tel:` reduce to the address or number.
pub fn format_url_display(url: &str) -> String {
    let url = url.trim();
    if let Some(rest) = strip_scheme(url, MAILTO).or_else(|| strip_scheme(url, TEL)) {
        return rest.to_string();
    }

    let rest = match url.find("://") {
        Some(idx) => {
            let after = &url[idx + 3..];
            after
                .split(|c| c == '?' || c == '#')
                .next()
                .unwrap_or(after)
        }
        None => url,
    };
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    rest.trim_end_matches('/').to_string()
}

/// Host of an absolute URL without `www.`; `None` when there is no scheme.
fn url_host(url: &str) -> Option<&str> {
    let (_, after) = url.trim().split_once("://")?;
    let host = after
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .filter(|h| !h.is_empty())?;
    Some(host.strip_prefix("www.").unwrap_or(host))
}

fn strip_scheme<'a>(url: &'a str, scheme: &str) -> Option<&'a str> {
    let head = url.get(..scheme.len())?;
    if head.eq_ignore_ascii_case(scheme) {
        Some(&url[scheme.len()..])
    } else {
        None
    }
}

/// Whether the account must not be rendered as a link: auth-gated accounts
/// and e-mail/phone links are withheld from unauthenticated viewers.
pub fn is_redacted(account: &ContactAccount, authenticated: bool) -> bool {
    if authenticated {
        return false;
    }
    account.requires_auth
        || account
            .url
            .as_deref()
            .is_some_and(|u| strip_scheme(u, MAILTO).is_some() || strip_scheme(u, TEL).is_some())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactIcon {
    GitHub,
    LinkedIn,
    X,
    Facebook,
    Instagram,
    Website,
    Email,
    Phone,
    Link,
}

impl ContactIcon {
    fn exact(key: &str) -> Option<Self> {
        match key {
            "github" => Some(ContactIcon::GitHub),
            "linkedin" => Some(ContactIcon::LinkedIn),
            "x" | "twitter" => Some(ContactIcon::X),
            "facebook" => Some(ContactIcon::Facebook),
            "instagram" => Some(ContactIcon::Instagram),
            "website" => Some(ContactIcon::Website),
            "email" => Some(ContactIcon::Email),
            "phone" => Some(ContactIcon::Phone),
            _ => None,
        }
    }

    /// Exact icon key, then exact name, then substring heuristics; `Link`
    /// when nothing matches.
    pub fn resolve(name: &str, icon: Option<&str>) -> Self {
        let icon_key = icon.unwrap_or_default().trim().to_lowercase();
        let name_key = name.trim().to_lowercase();

        if let Some(found) = Self::exact(&icon_key).or_else(|| Self::exact(&name_key)) {
            return found;
        }

        let key = format!("{icon_key} {name_key}");
        if key.contains("git") {
            ContactIcon::GitHub
        } else if key.contains("linkedin") {
            ContactIcon::LinkedIn
        } else if key.contains("twitter") || key.split_whitespace().any(|w| w == "x") {
            ContactIcon::X
        } else if key.contains("facebook") {
            ContactIcon::Facebook
        } else if key.contains("instagram") {
            ContactIcon::Instagram
        } else if key.contains("website") {
            ContactIcon::Website
        } else if key.contains("email") {
            ContactIcon::Email
        } else if key.contains("phone") {
            ContactIcon::Phone
        } else {
            ContactIcon::Link
        }
    }
}

/// Capitalized label (or name); else the link host; else `"Profile"`.
pub fn contact_tooltip(account: &ContactAccount) -> String {
    let label = account
        .label
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| account.name.trim());

    let mut chars = label.chars();
    if let Some(first) = chars.next() {
        return first.to_uppercase().chain(chars).collect();
    }

    account
        .url
        .as_deref()
        .and_then(url_host)
        .map(str::to_string)
        .unwrap_or_else(|| "Profile".to_string())
}
