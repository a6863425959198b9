/// First tag of a comma-separated color field, passed through verbatim.
pub fn derive_color_class(color: &str) -> &str {
    color.split(',').next().unwrap_or("")
}
