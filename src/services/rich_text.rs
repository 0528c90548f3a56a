/// Body of a plot element: a heading with the title, then one paragraph.
///
/// With `escape` off both strings are embedded as-is, markup included.
pub fn plot_html(title: &str, text: &str, escape: bool) -> String {
    if escape {
        format!("<h1>{}</h1><p>{}</p>", escape_html(title), escape_html(text))
    } else {
        format!("<h1>{title}</h1><p>{text}</p>")
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn has_markup(s: &str) -> bool {
    s.contains('<') || s.contains('&')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_then_paragraph() {
        assert_eq!(
            plot_html("Warrior", "A fighter's tale.", false),
            "<h1>Warrior</h1><p>A fighter's tale.</p>"
        );
    }

    #[test]
    fn raw_mode_keeps_markup() {
        assert_eq!(
            plot_html("Tom & Jerry", "<b>bold</b>", false),
            "<h1>Tom & Jerry</h1><p><b>bold</b></p>"
        );
    }

    #[test]
    fn escaped_mode() {
        assert_eq!(
            plot_html("Tom & Jerry", "a < b", true),
            "<h1>Tom &amp; Jerry</h1><p>a &lt; b</p>"
        );
        assert_eq!(escape_html(r#""it's""#), "&quot;it&#39;s&quot;");
    }
}
