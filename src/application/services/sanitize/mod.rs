use once_cell::sync::Lazy;

// Reports arrive as HTML from a contenteditable editor and are later
// served to other users, so everything scriptable has to go before the
// markup is stored.
static REPORT_POLICY: Lazy<ammonia::Builder<'static>> = Lazy::new(|| {
    let mut builder = ammonia::Builder::default();
    // Editors emit execCommand-era markup: font tags, inline styles
    builder.add_tags(["font"]);
    builder.add_tag_attributes("font", ["color", "face", "size"]);
    builder.add_generic_attributes(["class", "style"]);
    // Report images are inlined as data URLs
    builder.add_url_schemes(["data"]);
    builder.url_relative(ammonia::UrlRelative::PassThrough);
    builder.link_rel(Some("noopener noreferrer"));
    builder
});

pub fn clean_report_html(html: &str) -> String {
    REPORT_POLICY.clean(html).to_string()
}
