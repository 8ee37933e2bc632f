use pg_session::AuthSnapshot;

use std::io::{self, Write};

pub const TITLE: &str = "PG Admin Dashboard";
pub const MISSING: &str = "N/A";
pub const PHONE_MISSING: &str = "Not provided";

const QUICK_ACTIONS: [(&str, &str); 3] = [
    ("Manage PG", "View and manage your PG properties"),
    ("Tenants", "Manage tenant information"),
    ("Payments", "Track rent and payments"),
];

/// Only an empty value falls back to a placeholder; whitespace is shown as is.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Dashboard for the signed-in user. Missing profile fields show
/// placeholders; a profile that failed to load is not an error here.
pub fn render(snapshot: &AuthSnapshot, out: &mut dyn Write) -> io::Result<()> {
    let profile = snapshot.profile.as_ref();
    let user = snapshot.user.as_ref();

    let name = non_empty(profile.map(|p| p.name.as_str())).unwrap_or(MISSING);
    let email = non_empty(profile.map(|p| p.email.as_str()))
        .or_else(|| non_empty(user.and_then(|u| u.email.as_deref())))
        .unwrap_or(MISSING);
    let phone = non_empty(profile.and_then(|p| p.phone_number.as_deref())).unwrap_or(PHONE_MISSING);
    let user_id = user
        .map(|u| u.id.to_string())
        .unwrap_or_else(|| String::from(MISSING));

    writeln!(out, "{TITLE}")?;
    writeln!(out, "Welcome back!")?;
    writeln!(out)?;
    writeln!(out, "Profile Information")?;
    writeln!(out, "  Name:         {name}")?;
    writeln!(out, "  Email:        {email}")?;
    writeln!(out, "  Phone Number: {phone}")?;
    writeln!(out, "  User ID:      {user_id}")?;
    writeln!(out)?;
    writeln!(out, "Quick Actions")?;
    for (action, description) in QUICK_ACTIONS {
        writeln!(out, "  - {action}: {description}")?;
    }
    Ok(())
}
