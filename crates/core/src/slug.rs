//! Naming helpers: URL slugs for trips and display labels for stages.

/// Generate a URL slug from a trip title.
///
/// Lowercases, maps every non-alphanumeric run to a single `-`, and
/// trims leading/trailing dashes.
///
/// # Examples
///
/// ```
/// use motogiro_core::slug::slugify;
///
/// assert_eq!(slugify("Giro delle Dolomiti"), "giro-delle-dolomiti");
/// assert_eq!(slugify("  Stelvio -- 48 tornanti!  "), "stelvio-48-tornanti");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_dash = true; // suppress a leading dash

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Zero-padded display label for a stage index (`0` -> `"01"`).
///
/// Stage indexes are zero-based in storage but presented one-based.
pub fn stage_label(stage_index: i32) -> String {
    format!("{:02}", stage_index + 1)
}
