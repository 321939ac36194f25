use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Font metrics used to size a table node before the host renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub header_padding: f64,
    pub min_node_width: f64,
    pub min_node_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 24.0,
            padding_x: 12.0,
            padding_y: 8.0,
            header_padding: 6.0,
            min_node_width: 180.0,
            min_node_height: 60.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        UnicodeWidthStr::width(text) as f64 * self.char_width
    }

    /// Size of a node showing `label` as its header and one row per column.
    pub fn node_size<'a, I>(&self, label: &str, columns: I) -> (f64, f64)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let header_width = self.text_width(label);

        let mut rows = 0usize;
        let mut max_row_width: f64 = 0.0;
        for (name, typ) in columns {
            rows += 1;
            // name, type and the two handle dots
            let w = self.text_width(name) + self.text_width(typ) + self.char_width * 4.0;
            max_row_width = max_row_width.max(w);
        }

        let content_width = header_width.max(max_row_width) + self.padding_x * 2.0;
        let width = content_width.max(self.min_node_width);

        let header_height = self.line_height + self.header_padding * 2.0;
        let body_height = if rows == 0 {
            0.0
        } else {
            rows as f64 * self.line_height + self.padding_y * 2.0
        };

        let height = (header_height + body_height).max(self.min_node_height);

        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("users"), 5.0 * 8.0);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // full-width characters take two cells
        assert_eq!(m.text_width("注文"), 4.0 * 8.0);
    }

    #[test]
    fn test_node_size_no_columns() {
        let m = TextMetrics::default();
        let (w, h) = m.node_size("users", Vec::<(&str, &str)>::new());
        assert_eq!(w, m.min_node_width);
        assert_eq!(h, m.min_node_height);
    }

    #[test]
    fn test_node_size_grows_with_rows() {
        let m = TextMetrics::default();
        let one = m.node_size("users", [("id", "number")]);
        let three = m.node_size(
            "users",
            [("id", "number"), ("email", "string"), ("name", "string")],
        );
        assert!(three.1 > one.1);
        assert_eq!(three.1 - one.1, 2.0 * m.line_height);
    }

    #[test]
    fn test_node_size_wide_column() {
        let m = TextMetrics::default();
        let long = "a_really_long_column_name_for_testing";
        let (w, _) = m.node_size("t", [(long, "string")]);
        assert!(w > m.min_node_width);
        assert!(w >= m.text_width(long));
    }
}
